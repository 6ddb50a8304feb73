// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Authorization state: importing it into other datacenters, recording
//! sign-in, and logging out.
use ferrogram_mtsender::InvocationError;
use ferrogram_session::UserIdentity;
use ferrogram_tl as tl;
use log::{info, warn};

use super::Client;

impl Client {
    /// Record that sign-in completed (the actual sign-in RPCs live above
    /// this crate). The identity is persisted atomically together with
    /// whatever key material the sign-in produced.
    pub fn mark_signed_in(&self, user: UserIdentity) {
        self.0.storage.begin_transaction();
        self.0.storage.save_identity(&user);
        self.0.storage.commit();
        self.0.peers.lock().unwrap().set_self_user(user);
    }

    /// Copy the logged-in state from one datacenter to another, by
    /// exporting it on the source and importing it on the target.
    ///
    /// The target's authorization key is created on first contact as a
    /// side effect of invoking there.
    pub(crate) async fn transfer_authorization(
        &self,
        from_dc: i32,
        to_dc: i32,
    ) -> Result<(), InvocationError> {
        info!("transferring authorization from dc {from_dc} to dc {to_dc}");

        let exported = self
            .invoke_in_dc(from_dc, &tl::functions::auth::ExportAuthorization { dc_id: to_dc })
            .await?;
        let tl::enums::auth::ExportedAuthorization::Authorization(exported) = exported;

        let imported = self
            .invoke_in_dc(
                to_dc,
                &tl::functions::auth::ImportAuthorization {
                    id: exported.id,
                    bytes: exported.bytes,
                },
            )
            .await?;
        let tl::enums::auth::Authorization::Authorization(_) = imported;

        Ok(())
    }

    /// Log out from every datacenter holding an authorization key, then
    /// wipe the session storage.
    ///
    /// Idempotent: with no keys stored this returns successfully without
    /// any network traffic.
    pub async fn sign_out(&self) -> Result<(), InvocationError> {
        let dc_ids = self.0.storage.auth_key_datacenters();
        if dc_ids.is_empty() {
            info!("sign out with no stored keys; nothing to do");
            return Ok(());
        }

        // A datacenter refusing the logout must not leave the others (or
        // the local wipe) undone.
        for dc_id in &dc_ids {
            match self.invoke_in_dc(*dc_id, &tl::functions::auth::LogOut).await {
                Ok(tl::enums::auth::LoggedOut::LoggedOut(_)) => {
                    info!("logged out from dc {dc_id}")
                }
                Err(err) => warn!("failed to log out from dc {dc_id}: {err}"),
            }
        }

        self.0.storage.wipe();
        for dc_id in dc_ids {
            self.0.handle.disconnect_from_dc(dc_id);
        }
        Ok(())
    }
}
