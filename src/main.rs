mod cli;

use clap::Parser;
use cli::Cli;
use power_rain::{PowerRain, Presenter, Session};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.full_table {
        // Read by polars when formatting a DataFrame; -1 means no row limit.
        std::env::set_var("POLARS_FMT_MAX_ROWS", "-1");
    }

    let client = match PowerRain::with_config(&cli.fetch_config()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let presenter = Presenter::new(cli.chart_target());
    let mut session = Session::new(client);

    if cli.interactive {
        return match cli::interactive::run(&mut session, &presenter, cli.input_state()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let mut stdout = io::stdout().lock();
    let outcome = session.update(cli.input_state());
    let rendered = presenter
        .render_header(&mut stdout)
        .and_then(|()| presenter.render(&mut stdout, outcome));
    if let Err(e) = rendered {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match outcome {
        Ok(run) if run.enriched.is_ok() => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
