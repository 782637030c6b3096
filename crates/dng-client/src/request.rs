//! # Request Builder
//!
//! One program instruction plus everything needed to land it: extra
//! signers, instructions to run first, and an optional durable nonce.
//!
//! With a durable nonce the transaction is signed against the nonce's stored
//! value instead of a recent blockhash, and its first instruction advances
//! the nonce. Such a transaction stays valid until the nonce moves, so it can
//! be signed now and submitted much later.

use dng_runtime::system_program;
use shared_crypto::Signer;
use shared_types::{AccountMeta, Instruction, Pubkey, Signature, Transaction};
use tracing::{debug, info};

use crate::errors::ClientResult;
use crate::nonce::fetch_nonce;
use crate::provider::SignerRef;
use crate::workspace::ProgramHandle;

/// Builder for a single program request.
pub struct RequestBuilder<'a> {
    program: &'a ProgramHandle,
    data: Vec<u8>,
    accounts: Vec<AccountMeta>,
    pre_instructions: Vec<Instruction>,
    signers: Vec<SignerRef<'a>>,
    durable_nonce: Option<(Pubkey, SignerRef<'a>)>,
}

impl<'a> RequestBuilder<'a> {
    /// Request carrying `data` for `program`, with no accounts yet.
    pub fn new(program: &'a ProgramHandle, data: Vec<u8>) -> Self {
        Self {
            program,
            data,
            accounts: Vec::new(),
            pre_instructions: Vec::new(),
            signers: Vec::new(),
            durable_nonce: None,
        }
    }

    /// Set the instruction's accounts.
    #[must_use]
    pub fn accounts(mut self, accounts: Vec<AccountMeta>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Add a signer besides the wallet.
    #[must_use]
    pub fn signer(mut self, signer: SignerRef<'a>) -> Self {
        self.signers.push(signer);
        self
    }

    /// Run `instruction` before the program instruction.
    #[must_use]
    pub fn pre_instruction(mut self, instruction: Instruction) -> Self {
        self.pre_instructions.push(instruction);
        self
    }

    /// Sign against the durable nonce stored in `nonce`, advanced by
    /// `authority`.
    #[must_use]
    pub fn durable_nonce(mut self, nonce: Pubkey, authority: SignerRef<'a>) -> Self {
        self.durable_nonce = Some((nonce, authority));
        self
    }

    /// The program instruction alone.
    pub fn instruction(&self) -> Instruction {
        Instruction::new_with_bytes(self.program.id(), &self.data, self.accounts.clone())
    }

    /// Every instruction in order: nonce advance, pre-instructions, then the
    /// program instruction.
    pub fn instructions(&self) -> Vec<Instruction> {
        let mut out = Vec::with_capacity(self.pre_instructions.len() + 2);
        if let Some((nonce, authority)) = &self.durable_nonce {
            out.push(system_program::advance_nonce_account(
                nonce,
                &authority.pubkey(),
            ));
        }
        out.extend(self.pre_instructions.iter().cloned());
        out.push(self.instruction());
        out
    }

    /// Build and sign without sending.
    pub async fn transaction(&self) -> ClientResult<Transaction> {
        let provider = self.program.provider();
        let blockhash = match &self.durable_nonce {
            Some((nonce, _)) => {
                let data = fetch_nonce(&**provider.connection(), nonce).await?;
                debug!(
                    %nonce,
                    durable_nonce = %data.durable_nonce,
                    "Signing against durable nonce"
                );
                data.durable_nonce
            }
            None => provider.connection().get_latest_blockhash().await?,
        };

        let mut signers = self.signers.clone();
        if let Some((_, authority)) = self.durable_nonce {
            signers.push(authority);
        }
        provider.sign_transaction(&self.instructions(), &signers, blockhash)
    }

    /// Sign, send and wait for confirmation.
    pub async fn rpc(self) -> ClientResult<Signature> {
        let tx = self.transaction().await?;
        let signature = self
            .program
            .provider()
            .send_and_confirm_transaction(&tx)
            .await?;
        info!(program = self.program.name(), %signature, "Request confirmed");
        Ok(signature)
    }
}

impl std::fmt::Debug for RequestBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("program", &self.program.name())
            .field("data", &self.data)
            .field("accounts", &self.accounts.len())
            .field("signers", &self.signers.len())
            .field("durable_nonce", &self.durable_nonce.map(|(n, _)| n))
            .finish_non_exhaustive()
    }
}
