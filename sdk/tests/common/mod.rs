//! Shared harness for the localnet suites.
//!
//! Tests talk to a validator at `ANCHOR_PROVIDER_URL` with the core, rate
//! mock and redeem logic lending programs deployed and one tranche created
//! by the `ANCHOR_WALLET` keypair.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use solana_sdk::pubkey::Pubkey;
use tokio::sync::{Mutex, MutexGuard};
use vyper_sdk::{
    BaseClient, RateMockPlugin, RedeemLogicLendingPlugin, SdkConfig, SdkResult, TrancheConfig,
    Vyper,
};

static INIT: Once = Once::new();

// Every scenario mutates the same tranche
static SERIAL: Mutex<()> = Mutex::const_new(());

/// Initialize tracing for tests, once per process
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vyper_sdk=debug"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Check if localnet tests should run
pub fn should_run_localnet_tests() -> bool {
    std::env::var("RUN_LOCALNET_TESTS").is_ok()
}

pub struct TestContext {
    pub config: SdkConfig,
    pub base: Arc<BaseClient>,
    /// First tranche configuration owned by the core program
    pub tranche_id: Pubkey,
    _serial: MutexGuard<'static, ()>,
}

impl TestContext {
    pub async fn localnet() -> SdkResult<Self> {
        init_test_tracing();
        let serial = SERIAL.lock().await;

        let config = SdkConfig::from_env()?;
        let base = Arc::new(BaseClient::from_config(&config)?);

        let tranches = Vyper::create(base.clone(), config.programs.core)
            .find_tranche_configs()
            .await?;
        let (tranche_id, _) = tranches
            .into_iter()
            .next()
            .ok_or(vyper_sdk::SdkError::InvalidParameters(
                "no tranche configuration deployed".to_string(),
            ))?;

        Ok(Self {
            config,
            base,
            tranche_id,
            _serial: serial,
        })
    }

    /// Core client with the tranche selected and no plugins
    pub fn vyper(&self) -> Vyper {
        Vyper::create(self.base.clone(), self.config.programs.core).with_tranche_id(self.tranche_id)
    }

    pub fn rate_mock(&self, tranche: &TrancheConfig) -> RateMockPlugin {
        RateMockPlugin::create(self.base.clone(), self.config.programs.rate_mock)
            .with_state_id(tranche.rate_program_state)
    }

    pub fn redeem_logic_lending(&self, tranche: &TrancheConfig) -> RedeemLogicLendingPlugin {
        RedeemLogicLendingPlugin::create(self.base.clone(), self.config.programs.redeem_logic_lending)
            .with_state_id(tranche.redeem_logic_program_state)
    }
}

/// Declare a test that only runs against a live validator
#[macro_export]
macro_rules! test_localnet {
    ($name:ident, $test_fn:expr) => {
        #[tokio::test]
        #[ignore = "Run with RUN_LOCALNET_TESTS=1"]
        async fn $name() {
            use $crate::common::{should_run_localnet_tests, TestContext};
            if !should_run_localnet_tests() {
                return;
            }

            let ctx = TestContext::localnet()
                .await
                .expect("Failed to create localnet test context");
            ($test_fn)(ctx).await.expect("Test failed");
        }
    };
}
