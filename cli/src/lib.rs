mod api_keys;
mod args;
mod client;
mod command;
mod confirm;
mod ui;
mod whoami;

use anyhow::Result;
pub use command::RunCommand;
use tokio::io::AsyncWriteExt;
use tracing::log::info;

pub use self::args::Cli;

pub async fn run_cli(args: Cli) -> Result<()> {
    info!("Base url: {}", args.common.base_url());
    let stdout = tokio::io::stdout();
    let mut stdout = tokio::io::BufWriter::new(stdout);

    let stderr = tokio::io::stderr();
    let mut stderr = tokio::io::BufWriter::new(stderr);
    let res = args
        .command
        .run(&mut stdout, &mut stderr, &args.common)
        .await;
    stdout.flush().await?;
    stderr.flush().await?;
    res
}

macro_rules! emitln {
    ($dst: expr) => {
        {
            tokio::io::AsyncWriteExt::write_all($dst, b"\n").await?
        }
    };
    ($dst: expr, $fmt: expr) => {
        {
            use std::io::Write;
            let mut buf = Vec::<u8>::new();
            writeln!(buf, $fmt)?;
            tokio::io::AsyncWriteExt::write_all($dst, &buf).await?
        }
    };
    ($dst: expr, $fmt: expr, $($arg: tt)*) => {
        {
            use std::io::Write;
            let mut buf = Vec::<u8>::new();
            writeln!(buf, $fmt, $( $arg )*)?;
            tokio::io::AsyncWriteExt::write_all($dst, &buf).await?
        }
    };
}

pub(crate) use emitln;

pub mod test_helpers {
    use anyhow::Result;
    use clap::Parser;
    use tokio::io::{
        AsyncReadExt,
        AsyncWriteExt,
        BufWriter,
    };
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use crate::Cli;

    /// Everything a command invocation produced, with both output streams
    /// captured in memory.
    pub struct CommandOutput {
        pub result: Result<()>,
        pub stdout: String,
        pub stderr: String,
    }

    /// Parses `argv` and runs the resolved command against in-memory
    /// writers. Both writers are flushed before returning, mirroring what
    /// [`crate::run_cli`] does with the real stdout/stderr.
    pub async fn run_command<I, T>(argv: I) -> CommandOutput
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let args = match Cli::try_parse_from(argv) {
            | Ok(args) => args,
            | Err(e) => {
                return CommandOutput {
                    result: Err(e.into()),
                    stdout: String::new(),
                    stderr: String::new(),
                }
            }
        };

        let mut stdout = BufWriter::new(Vec::new());
        let mut stderr = BufWriter::new(Vec::new());
        let result = args
            .command
            .run(&mut stdout, &mut stderr, &args.common)
            .await;
        stdout.flush().await.unwrap();
        stderr.flush().await.unwrap();
        CommandOutput {
            result,
            stdout: String::from_utf8(stdout.into_inner()).unwrap(),
            stderr: String::from_utf8(stderr.into_inner()).unwrap(),
        }
    }

    /// Serves exactly one http request with a canned response. Returns the
    /// base url to point the client at, and a handle resolving to the raw
    /// request the server saw.
    pub async fn one_shot_server(
        status: u16,
        body: &str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let reason = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("");
        let response = format!(
            "HTTP/1.1 {} {}\r\ncontent-type: \
             application/json\r\ncontent-length: {}\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            let head_end = loop {
                let n = stream.read(&mut buf).await.unwrap();
                assert!(n > 0, "peer closed before sending a full request");
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) =
                    request.windows(4).position(|w| w == b"\r\n\r\n")
                {
                    break pos + 4;
                }
            };
            let expected_body = content_length(&request[..head_end]);
            while request.len() < head_end + expected_body {
                let n = stream.read(&mut buf).await.unwrap();
                assert!(n > 0, "peer closed before sending the full body");
                request.extend_from_slice(&buf[..n]);
            }

            stream.write_all(response.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
            String::from_utf8(request).unwrap()
        });

        (format!("http://{}", addr), handle)
    }

    fn content_length(head: &[u8]) -> usize {
        String::from_utf8_lossy(head)
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0)
    }
}
