//! Remote endpoint flags shared by every networked subcommand.

use anyhow::{Context, Result};
use clap::Args;

use keggraph_rest::{KeggRest, RestClient, RestConfig};

#[derive(Args, Debug, Clone, Default)]
pub struct RestArgs {
    /// Per-field entry service base URL (default: $KEGGRAPH_TOGOWS_URL or togows.dbcls.jp).
    #[arg(long, global = true)]
    pub togows_url: Option<String>,

    /// KEGG REST base URL (default: $KEGGRAPH_KEGG_URL or rest.kegg.jp).
    #[arg(long, global = true)]
    pub kegg_url: Option<String>,

    /// HTTP User-Agent.
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Entries per KEGG `get` request.
    #[arg(long, global = true)]
    pub max_ids: Option<usize>,
}

impl RestArgs {
    /// Environment configuration with flags applied on top.
    pub fn config(&self) -> Result<RestConfig> {
        let mut config = RestConfig::from_env().context("invalid KEGGRAPH_* environment")?;
        self.apply(&mut config);
        config.validate().context("invalid endpoint flags")?;
        Ok(config)
    }

    fn apply(&self, config: &mut RestConfig) {
        if let Some(url) = &self.togows_url {
            config.togows_base_url = url.clone();
        }
        if let Some(url) = &self.kegg_url {
            config.kegg_base_url = url.clone();
        }
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(max) = self.max_ids {
            config.max_ids_per_request = max;
        }
    }

    pub fn client(&self) -> Result<KeggRest<RestClient>> {
        let config = self.config()?;
        KeggRest::from_config(&config).context("failed to set up HTTP client")
    }
}
