use std::{env, fs, process::ExitCode};

use step::{Runner, StdPrint};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(file_path) = args.get(1) else {
        eprintln!("usage: step <program.step>");
        return ExitCode::FAILURE;
    };

    let code = match read_file(file_path) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let runner = match Runner::new(code) {
        Ok(runner) => runner,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match runner.run(&mut StdPrint) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn read_file(file_path: &str) -> Result<String, String> {
    match fs::metadata(file_path) {
        Ok(metadata) => {
            if !metadata.is_file() {
                return Err(format!("{file_path} is not a file"));
            }
        }
        Err(err) => {
            return Err(format!("cannot read {file_path}: {err}"));
        }
    }
    fs::read_to_string(file_path).map_err(|err| format!("cannot read {file_path}: {err}"))
}
