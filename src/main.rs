//! Interactive line-oriented loop: reads one statement per line,
//! dispatches to parse + execute, and prints results or errors.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use minisql::format;
use minisql::sql::engine::{Engine, ResultSet};

fn main() -> rustyline::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut engine = Engine::new();
    let mut rl = DefaultEditor::new()?;
    println!("Mini SQL Engine Ready. Type your SQL queries. Type EXIT to quit.\n");

    loop {
        match rl.readline("SQL> ") {
            Ok(line) => {
                let query = line.trim();
                if query.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(query);
                if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
                    println!("Goodbye!");
                    break;
                }
                match engine.session().execute(query) {
                    Ok(result) => {
                        println!("{}", format::format_result(&result));
                        if let ResultSet::Query { rows, .. } = &result {
                            println!("{} row(s)\n", rows.len());
                        }
                    }
                    Err(err) => println!("ERROR: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("ERROR: {}", err);
                break;
            }
        }
    }
    Ok(())
}
