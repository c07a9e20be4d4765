// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! EMR cluster discovery and connection resolution

pub mod descriptor;
pub mod entities;
pub mod primary;
pub mod security;
pub mod topology;
pub mod validator;

pub use self::descriptor::{
    AppliedArtifacts, ConnectRequest, ConnectionPlan, EmrConnectionDescriptor,
};
pub use self::entities::{ClusterRecord, InstancePage, InstanceRecord, KerberosAttributes};
pub use self::primary::PrimaryNode;
pub use self::security::{KerberosProvider, SecurityConfiguration};
pub use self::topology::{assume_role, ClusterTopology};
pub use self::validator::ConnectionValidator;
