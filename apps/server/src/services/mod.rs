// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service layer: upstream clients and the schedule record store.

pub mod aps;
pub mod auth;
pub mod render;
pub mod store;

pub use aps::{interpret_ifc_manifest, ApsClient, DerivativeFormat};
pub use auth::TokenCache;
pub use render::RenderClient;
pub use store::{MemoryRepository, ScheduleRepository, StoredRecord};
