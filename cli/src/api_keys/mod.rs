use anyhow::Result;
use clap::clap_derive::Parser;

use crate::args::CommonOptions;
use crate::RunCommand;

mod generate;
mod list;
mod revoke;

#[derive(Parser, Debug, Clone)]
pub enum ApiKeyCommand {
    /// Generate a new API key with the given name
    #[command(visible_alias = "create")]
    Generate(generate::Generate),
    /// List api keys
    #[command(visible_alias = "ls")]
    List(list::List),
    /// Revokes an API key
    Revoke(revoke::Revoke),
}

impl ApiKeyCommand {
    pub async fn run<
        A: tokio::io::AsyncWrite + Send + Sync + Unpin,
        B: tokio::io::AsyncWrite + Send + Sync + Unpin,
    >(
        &self,
        out: &mut tokio::io::BufWriter<A>,
        err: &mut tokio::io::BufWriter<B>,
        common_options: &CommonOptions,
    ) -> Result<()> {
        match self {
            | ApiKeyCommand::Generate(c) => {
                c.run(out, err, common_options).await
            }
            | ApiKeyCommand::List(c) => c.run(out, err, common_options).await,
            | ApiKeyCommand::Revoke(c) => {
                c.run(out, err, common_options).await
            }
        }
    }
}
