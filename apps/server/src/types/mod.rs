// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and response types.

pub mod request;
pub mod response;

pub use request::{
    RenderRequest, SaveScheduleRequest, TopFoldersQuery, TranslateRequest, VersionsQuery,
};
pub use response::{
    ApiInfoResponse, ConversionStartedResponse, EndpointInfo, HealthResponse, MessageResponse,
    RenderResponse, SaveScheduleResponse, ScheduleListResponse, ScheduleResponse, TokenResponse,
};
