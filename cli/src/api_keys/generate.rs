use anyhow::Result;
use async_trait::async_trait;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use crate::args::CommonOptions;
use crate::{emitln, RunCommand};

#[derive(Clone, Debug, Parser)]
pub struct Generate {
    /// The name of the key to be generated
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    name: String,
}

#[async_trait]
impl RunCommand for Generate {
    async fn run<
        A: tokio::io::AsyncWrite + Send + Sync + Unpin,
        B: tokio::io::AsyncWrite + Send + Sync + Unpin,
    >(
        &self,
        out: &mut tokio::io::BufWriter<A>,
        _err: &mut tokio::io::BufWriter<B>,
        common_options: &CommonOptions,
    ) -> Result<()> {
        let client = common_options.new_client()?;

        let response =
            pulseback_client::api_keys::gen(&client, &self.name).await?;

        let response = response.into_inner()?;

        // The secret is printed here and nowhere else. Once this scrolls
        // off the user's terminal it is gone for good.
        emitln!(out, "Registered api key '{}':", self.name);
        emitln!(out);
        emitln!(out, "{}", response.key);
        emitln!(out);
        emitln!(
            out,
            "This key will not be shown again, so please save it now."
        );
        Ok(())
    }
}
