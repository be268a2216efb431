use std::process::ExitCode;

use ext_sort::ExtSortError;
use ext_sort::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = ext_sort::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<ExtSortError>()
                .map(ExtSortError::exit_code)
                .unwrap_or(1);
            out::print_error(&format!("{e:#}"));
            ExitCode::from(code)
        }
    }
}
