//! # Durable Nonce Game Client
//!
//! Typed request builders for the game's instructions and readers for its
//! accounts.
//!
//! ```ignore
//! let game = DurableNonceGameClient::new(&workspace).await?;
//! game.methods().create_game(&alice)?.rpc().await?;
//! game.methods().accept_game(&bob, &alice.pubkey(), board)?.rpc().await?;
//! let state = game.fetch_game(&alice.pubkey()).await?;
//! ```

use durable_nonce_game::instruction;
use durable_nonce_game::pda::{find_game_address, find_vault_address};
use durable_nonce_game::{Board, Game, PROGRAM_NAME};
use shared_crypto::Signer;
use shared_types::{Instruction, Pubkey};

use crate::errors::{ClientError, ClientResult};
use crate::provider::SignerRef;
use crate::request::RequestBuilder;
use crate::workspace::{ProgramHandle, Workspace};

/// Builders for each game instruction.
///
/// The acting player pays their own rent and stake; the wallet pays fees.
#[derive(Debug, Clone, Copy)]
pub struct Methods<'a> {
    program: &'a ProgramHandle,
}

impl<'a> Methods<'a> {
    fn request(self, ix: Instruction) -> RequestBuilder<'a> {
        RequestBuilder::new(self.program, ix.data).accounts(ix.accounts)
    }

    fn player_request(self, player: SignerRef<'a>, ix: Instruction) -> RequestBuilder<'a> {
        self.request(ix).signer(player)
    }

    /// `initialize`: logs a greeting, touches no accounts.
    pub fn initialize(self) -> RequestBuilder<'a> {
        self.request(instruction::initialize())
    }

    /// `create_game` with `player` as player one.
    pub fn create_game(self, player: SignerRef<'a>) -> ClientResult<RequestBuilder<'a>> {
        let key = player.pubkey();
        let ix = instruction::create_game(&key, &key)?;
        Ok(self.player_request(player, ix))
    }

    /// `accept_game` of `player_one`'s game with an opening `board`.
    pub fn accept_game(
        self,
        player: SignerRef<'a>,
        player_one: &Pubkey,
        board: Board,
    ) -> ClientResult<RequestBuilder<'a>> {
        let key = player.pubkey();
        let ix = instruction::accept_game(&key, &key, player_one, board)?;
        Ok(self.player_request(player, ix))
    }

    /// `play_game` in `player_one`'s game.
    pub fn play_game(
        self,
        player: SignerRef<'a>,
        player_one: &Pubkey,
        board: Board,
    ) -> ClientResult<RequestBuilder<'a>> {
        let key = player.pubkey();
        let ix = instruction::play_game(&key, &key, player_one, board)?;
        Ok(self.player_request(player, ix))
    }

    /// `settle_game` in `player_one`'s game.
    pub fn settle_game(
        self,
        player: SignerRef<'a>,
        player_one: &Pubkey,
    ) -> ClientResult<RequestBuilder<'a>> {
        let key = player.pubkey();
        let ix = instruction::settle_game(&key, &key, player_one)?;
        Ok(self.player_request(player, ix))
    }
}

impl ProgramHandle {
    /// The game's instruction builders.
    pub fn methods(&self) -> Methods<'_> {
        Methods { program: self }
    }
}

/// Handle to the deployed game with account readers.
#[derive(Debug, Clone)]
pub struct DurableNonceGameClient {
    program: ProgramHandle,
}

impl DurableNonceGameClient {
    /// Resolve the game from `workspace`.
    pub async fn new(workspace: &Workspace) -> ClientResult<Self> {
        Ok(Self {
            program: workspace.program(PROGRAM_NAME).await?,
        })
    }

    /// The underlying program handle.
    pub fn program(&self) -> &ProgramHandle {
        &self.program
    }

    /// The game's instruction builders.
    pub fn methods(&self) -> Methods<'_> {
        self.program.methods()
    }

    /// Address of `player_one`'s game.
    pub fn game_address(player_one: &Pubkey) -> ClientResult<Pubkey> {
        Ok(find_game_address(player_one)?.0)
    }

    /// Address of the vault holding `player_one`'s stakes.
    pub fn vault_address(player_one: &Pubkey) -> ClientResult<Pubkey> {
        Ok(find_vault_address(&Self::game_address(player_one)?)?.0)
    }

    /// Current state of `player_one`'s game.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if no game is open, `AccountDecode` if the account
    /// is not a game.
    pub async fn fetch_game(&self, player_one: &Pubkey) -> ClientResult<Game> {
        let address = Self::game_address(player_one)?;
        let account = self
            .program
            .provider()
            .connection()
            .get_account(&address)
            .await?
            .ok_or(ClientError::AccountNotFound(address))?;

        if account.owner != self.program.id() {
            return Err(ClientError::AccountDecode {
                pubkey: address,
                reason: format!("owned by {}", account.owner),
            });
        }
        Game::try_from_account_data(&account.data).map_err(|err| ClientError::AccountDecode {
            pubkey: address,
            reason: err.to_string(),
        })
    }

    /// Lamports staked in `player_one`'s game.
    pub async fn vault_balance(&self, player_one: &Pubkey) -> ClientResult<u64> {
        let vault = Self::vault_address(player_one)?;
        self.program
            .provider()
            .connection()
            .get_balance(&vault)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;
    use durable_nonce_game::{GameState, BET_LAMPORTS, ID};
    use shared_crypto::Keypair;

    async fn client() -> DurableNonceGameClient {
        let provider = Provider::local(Keypair::new()).await.unwrap();
        DurableNonceGameClient::new(&Workspace::new(provider))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_initialize_instruction() {
        let client = client().await;
        let ix = client.methods().initialize().instruction();
        assert_eq!(ix.program_id, ID);
        assert!(ix.accounts.is_empty());
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let client = client().await;
        let wallet = client.program().provider().wallet();

        client
            .methods()
            .create_game(wallet)
            .unwrap()
            .rpc()
            .await
            .unwrap();

        let game = client.fetch_game(&wallet.pubkey()).await.unwrap();
        assert_eq!(game.state, GameState::Pending);
        assert_eq!(game.player_one, wallet.pubkey());
        assert_eq!(
            client.vault_balance(&wallet.pubkey()).await.unwrap(),
            BET_LAMPORTS
        );
    }

    #[tokio::test]
    async fn test_fetch_missing_game() {
        let client = client().await;
        let nobody = Pubkey::new_unique();
        let address = DurableNonceGameClient::game_address(&nobody).unwrap();
        assert!(matches!(
            client.fetch_game(&nobody).await,
            Err(ClientError::AccountNotFound(key)) if key == address
        ));
    }
}
