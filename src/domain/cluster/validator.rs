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

use crate::shared::error::ConnectError;
use regex::Regex;

/// Validates connection inputs before any remote call is made.
pub struct ConnectionValidator {
    cluster_id: Regex,
    role_arn: Regex,
}

impl ConnectionValidator {
    pub fn new() -> Result<Self, ConnectError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| ConnectError::config_error(e.to_string()))
        };
        Ok(Self {
            cluster_id: compile(r"^j-[0-9A-Z]+$")?,
            role_arn: compile(r"^arn:aws[a-zA-Z-]*:iam::\d{12}:role/[\w+=,.@/-]+$")?,
        })
    }

    pub fn validate(
        &self,
        cluster_id: &str,
        role_arn: Option<&str>,
        user_name: &str,
    ) -> Result<(), ConnectError> {
        if !self.cluster_id.is_match(cluster_id) {
            return Err(ConnectError::validation_error(format!(
                "Invalid EMR cluster id '{}'. Expected a value like 'j-3DD9ZR01DAU14'",
                cluster_id
            )));
        }

        if let Some(arn) = role_arn {
            if !self.role_arn.is_match(arn) {
                return Err(ConnectError::validation_error(format!(
                    "Invalid role arn '{}'. Expected 'arn:aws:iam::<account-id>:role/<role-name>'",
                    arn
                )));
            }
        }

        if user_name.trim().is_empty() || user_name.chars().any(char::is_whitespace) {
            return Err(ConnectError::validation_error(format!(
                "Invalid user name '{}'",
                user_name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_inputs() {
        let validator = ConnectionValidator::new().unwrap();
        assert!(validator.validate("j-3DD9ZR01DAU14", None, "livy").is_ok());
        assert!(validator
            .validate(
                "j-3DD9ZR01DAU14",
                Some("arn:aws:iam::123456789012:role/service-role/EmrAccess"),
                "ec2-user"
            )
            .is_ok());
        assert!(validator
            .validate(
                "j-3DD9ZR01DAU14",
                Some("arn:aws-cn:iam::123456789012:role/EmrAccess"),
                "livy"
            )
            .is_ok());
    }

    #[test]
    fn test_invalid_cluster_id() {
        let validator = ConnectionValidator::new().unwrap();
        assert!(validator.validate("cluster-1", None, "livy").is_err());
        assert!(validator.validate("j-3dd9", None, "livy").is_err());
    }

    #[test]
    fn test_invalid_role_arn() {
        let validator = ConnectionValidator::new().unwrap();
        let err = validator
            .validate("j-3DD9ZR01DAU14", Some("arn:aws:iam::1234:user/bob"), "livy")
            .unwrap_err();
        assert!(matches!(err, ConnectError::ValidationError(_)));
    }

    #[test]
    fn test_invalid_user_name() {
        let validator = ConnectionValidator::new().unwrap();
        assert!(validator.validate("j-3DD9ZR01DAU14", None, "").is_err());
        assert!(validator.validate("j-3DD9ZR01DAU14", None, "two words").is_err());
    }
}
