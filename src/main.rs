use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;
use pollpad::{run_live, run_local, LiveConfig};

/// Terminal client for live polls.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Backend base URL
    #[arg(long, env = "POLLPAD_URL", required_unless_present = "local")]
    url: Option<String>,

    /// Id of the moderator owning the poll
    #[arg(long, env = "POLLPAD_MODERATOR", required_unless_present = "local")]
    moderator: Option<String>,

    /// Id of the poll to open
    #[arg(long, env = "POLLPAD_POLL", required_unless_present = "local")]
    poll: Option<String>,

    /// Session token issued by the backend
    #[arg(long, env = "POLLPAD_TOKEN", required_unless_present = "local")]
    token: Option<String>,

    /// JSON file to run a poll from, without a backend
    #[arg(long)]
    local: Option<PathBuf>,

    /// File the log output goes to
    #[arg(long, default_value = "pollpad.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = pollpad::logging::init(&args.log_file) {
        eprintln!("Could not open log file {}: {}", args.log_file.display(), e);
        process::exit(1);
    }

    let result = match args.local {
        Some(path) => run_local(&path).await,
        None => {
            let (Some(url), Some(moderator), Some(poll), Some(token)) =
                (args.url, args.moderator, args.poll, args.token)
            else {
                eprintln!("Missing connection arguments; see --help");
                process::exit(2);
            };

            run_live(LiveConfig {
                base_url: url,
                moderator,
                poll,
                token,
            })
            .await
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error running poll client: {}", e);
        process::exit(1);
    }
}
