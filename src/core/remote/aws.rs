//! AWS SSM Parameter Store and KMS backend.
//!
//! Enable with `--features aws` (on by default).
//!
//! Credentials and region come from the default provider chain
//! (AWS_ACCESS_KEY_ID, shared config, instance metadata); an explicit region
//! can be passed at session construction. The async SDK is driven from the
//! synchronous core with a current-thread tokio runtime. Timeouts and
//! retries are the SDK's own; this layer adds none and propagates its
//! failures classified into the tagged error variants.

use std::future::Future;

use aws_sdk_ssm::types::ParameterType as SsmParameterType;
use tracing::trace;

use super::{
    KeyManagement, KeyMetadata, ParameterEntry, ParameterPage, ParameterStore, ParameterType,
    PutRequest,
};
use crate::error::{KeyError, StoreError};

/// One AWS session: shared credentials, region, and clients for both
/// services.
pub struct AwsSession {
    runtime: tokio::runtime::Runtime,
    ssm: aws_sdk_ssm::Client,
    kms: aws_sdk_kms::Client,
}

impl AwsSession {
    /// Load the default AWS configuration and build service clients.
    pub fn new(region: Option<String>) -> crate::error::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let config = runtime.block_on(async {
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
            if let Some(region) = region {
                loader = loader.region(aws_config::Region::new(region));
            }
            loader.load().await
        });

        Ok(Self {
            ssm: aws_sdk_ssm::Client::new(&config),
            kms: aws_sdk_kms::Client::new(&config),
            runtime,
        })
    }

    fn run<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

fn kind_from_wire(kind: Option<&SsmParameterType>) -> ParameterType {
    match kind {
        Some(SsmParameterType::SecureString) => ParameterType::SecureString,
        Some(SsmParameterType::StringList) => ParameterType::StringList,
        _ => ParameterType::String,
    }
}

fn kind_to_wire(kind: ParameterType) -> SsmParameterType {
    match kind {
        ParameterType::String => SsmParameterType::String,
        ParameterType::StringList => SsmParameterType::StringList,
        ParameterType::SecureString => SsmParameterType::SecureString,
    }
}

fn entry_from_wire(parameter: &aws_sdk_ssm::types::Parameter) -> ParameterEntry {
    ParameterEntry {
        name: parameter.name().unwrap_or_default().to_string(),
        value: parameter.value().unwrap_or_default().to_string(),
        kind: kind_from_wire(parameter.r#type()),
        last_modified: parameter.last_modified_date().map(|date| date.secs()),
    }
}

impl ParameterStore for AwsSession {
    fn get_by_path(
        &self,
        path: &str,
        recursive: bool,
        next_token: Option<&str>,
    ) -> Result<ParameterPage, StoreError> {
        trace!(path, recursive, "ssm get-parameters-by-path");

        let output = self
            .run(
                self.ssm
                    .get_parameters_by_path()
                    .path(path)
                    .recursive(recursive)
                    .set_next_token(next_token.map(String::from))
                    .send(),
            )
            .map_err(|err| StoreError::Access(format!("get-parameters-by-path failed: {err}")))?;

        Ok(ParameterPage {
            entries: output.parameters().iter().map(entry_from_wire).collect(),
            next_token: output.next_token().map(String::from),
        })
    }

    fn get_one(&self, name: &str, with_decryption: bool) -> Result<ParameterEntry, StoreError> {
        trace!(name, with_decryption, "ssm get-parameter");

        let output = self
            .run(
                self.ssm
                    .get_parameter()
                    .name(name)
                    .with_decryption(with_decryption)
                    .send(),
            )
            .map_err(|err| {
                let err = err.into_service_error();
                if err.is_parameter_not_found() {
                    StoreError::NotFound(name.to_string())
                } else {
                    StoreError::Access(format!("get-parameter failed: {err}"))
                }
            })?;

        let parameter = output
            .parameter()
            .ok_or_else(|| StoreError::Access(format!("no parameter returned for {name}")))?;

        Ok(entry_from_wire(parameter))
    }

    fn put(&self, request: &PutRequest) -> Result<(), StoreError> {
        trace!(name = %request.name, kind = request.kind.as_str(), "ssm put-parameter");

        self.run(
            self.ssm
                .put_parameter()
                .name(&request.name)
                .value(&request.value)
                .r#type(kind_to_wire(request.kind))
                .set_description(request.description.clone())
                .overwrite(request.overwrite)
                .set_key_id(request.key_id.clone())
                .send(),
        )
        .map_err(|err| {
            let err = err.into_service_error();
            if err.is_parameter_already_exists() {
                StoreError::AlreadyExists {
                    name: request.name.clone(),
                    message: err.to_string(),
                }
            } else {
                StoreError::Access(format!("put-parameter failed: {err}"))
            }
        })?;

        Ok(())
    }
}

impl KeyManagement for AwsSession {
    fn describe_key(&self, key_id: &str) -> Result<KeyMetadata, KeyError> {
        trace!(key_id, "kms describe-key");

        let output = self
            .run(self.kms.describe_key().key_id(key_id).send())
            .map_err(|err| {
                let err = err.into_service_error();
                if err.is_not_found_exception() {
                    KeyError::NotFound(key_id.to_string())
                } else {
                    KeyError::Access(format!("describe-key failed: {err}"))
                }
            })?;

        let metadata = output
            .key_metadata()
            .ok_or_else(|| KeyError::Access(format!("no key metadata returned for {key_id}")))?;

        Ok(KeyMetadata {
            key_id: metadata.key_id().to_string(),
        })
    }

    fn create_key(&self, description: &str) -> Result<KeyMetadata, KeyError> {
        trace!("kms create-key");

        let output = self
            .run(self.kms.create_key().description(description).send())
            .map_err(|err| KeyError::Access(format!("create-key failed: {err}")))?;

        let metadata = output
            .key_metadata()
            .ok_or_else(|| KeyError::Access("no key metadata returned".into()))?;

        Ok(KeyMetadata {
            key_id: metadata.key_id().to_string(),
        })
    }

    fn enable_rotation(&self, key_id: &str) -> Result<(), KeyError> {
        trace!(key_id, "kms enable-key-rotation");

        self.run(self.kms.enable_key_rotation().key_id(key_id).send())
            .map_err(|err| KeyError::Access(format!("enable-key-rotation failed: {err}")))?;

        Ok(())
    }

    fn create_alias(&self, alias: &str, key_id: &str) -> Result<(), KeyError> {
        trace!(alias, key_id, "kms create-alias");

        self.run(
            self.kms
                .create_alias()
                .alias_name(alias)
                .target_key_id(key_id)
                .send(),
        )
        .map_err(|err| {
            let err = err.into_service_error();
            if err.is_already_exists_exception() {
                KeyError::AliasExists(alias.to_string())
            } else {
                KeyError::Access(format!("create-alias failed: {err}"))
            }
        })?;

        Ok(())
    }
}
