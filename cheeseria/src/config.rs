// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Configuration of the server.

use cheeseria_core::env::get_optional_var;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port to listen on when none is configured.
const DEFAULT_PORT: u16 = 3001;

/// Address to bind to when none is configured.
const DEFAULT_BIND_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Settings that control how the server is exposed.
#[derive(Debug, PartialEq)]
pub struct Config {
    /// Address and port on which to accept connections.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Creates a new set of settings from environment variables whose names start with `prefix`.
    ///
    /// This looks for `<prefix>_BIND_ADDRESS` and `<prefix>_PORT`, both optional.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let address = get_optional_var::<IpAddr>(prefix, "BIND_ADDRESS")?;
        let port = get_optional_var::<u16>(prefix, "PORT")?;
        Ok(Self {
            bind_addr: SocketAddr::new(
                address.unwrap_or(DEFAULT_BIND_ADDRESS),
                port.unwrap_or(DEFAULT_PORT),
            ),
        })
    }
}
