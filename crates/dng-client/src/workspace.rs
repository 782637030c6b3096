//! Program lookup by name.

use std::collections::BTreeMap;

use shared_types::Pubkey;
use tracing::debug;

use crate::errors::{ClientError, ClientResult};
use crate::provider::Provider;
use crate::request::RequestBuilder;

/// Programs known to the client, by name.
#[derive(Debug, Clone)]
pub struct Workspace {
    provider: Provider,
    programs: BTreeMap<String, (String, Pubkey)>,
}

impl Workspace {
    /// Workspace with the durable nonce game registered.
    pub fn new(provider: Provider) -> Self {
        let mut workspace = Self {
            provider,
            programs: BTreeMap::new(),
        };
        workspace.register(durable_nonce_game::PROGRAM_NAME, durable_nonce_game::ID);
        workspace
    }

    /// Add or replace a program.
    pub fn register(&mut self, name: &str, program_id: Pubkey) {
        self.programs
            .insert(normalize(name), (name.to_string(), program_id));
    }

    /// Registered names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.programs.values().map(|(name, _)| name.as_str())
    }

    /// The provider requests go through.
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Handle to a deployed program.
    ///
    /// Names match ignoring case, `_` and `-`, so `DurableNonceGame` and
    /// `durable_nonce_game` are the same program.
    ///
    /// # Errors
    ///
    /// `ProgramNotFound` for an unknown name, `ProgramNotDeployed` if the id
    /// has no executable account on the cluster.
    pub async fn program(&self, name: &str) -> ClientResult<ProgramHandle> {
        let (display_name, program_id) = self
            .programs
            .get(&normalize(name))
            .cloned()
            .ok_or_else(|| ClientError::ProgramNotFound(name.to_string()))?;

        let deployed = self
            .provider
            .connection()
            .get_account(&program_id)
            .await?
            .is_some_and(|account| account.executable);
        if !deployed {
            return Err(ClientError::ProgramNotDeployed {
                name: display_name,
                program_id,
            });
        }

        debug!(name = %display_name, %program_id, "Program resolved");
        Ok(ProgramHandle {
            name: display_name,
            program_id,
            provider: self.provider.clone(),
        })
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// A deployed program and the provider used to reach it.
#[derive(Debug, Clone)]
pub struct ProgramHandle {
    name: String,
    program_id: Pubkey,
    provider: Provider,
}

impl ProgramHandle {
    /// Program id.
    pub fn id(&self) -> Pubkey {
        self.program_id
    }

    /// Workspace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Provider requests go through.
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Raw request with the given instruction data.
    pub fn request(&self, data: Vec<u8>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, data)
    }
}
