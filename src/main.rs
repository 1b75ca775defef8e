use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "rentbuy",
    about = "Rent-vs-buy net worth projection (amortization + reinvested cost differential)"
)]
enum Command {
    /// Serve the projection engine over HTTP.
    Serve {
        #[arg(default_value_t = 8080, help = "Port to listen on")]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();

    match Command::parse() {
        Command::Serve { port } => {
            if let Err(e) = rentbuy::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_definition_is_consistent() {
        Command::command().debug_assert();
    }
}
