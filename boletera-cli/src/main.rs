use std::env;
use std::io::{self, BufRead, Write};

use boletera_core::{Boletera, CatalogSources, Credentials, JsonFileStore, LoginError};

mod logging;
mod render;

/// Directory or base URL holding the three catalog documents
const DEFAULT_DATA: &str = "data";
/// Where image overrides are persisted between sessions
const DEFAULT_OVERRIDES: &str = "data/imagenes.json";

#[tokio::main]
async fn main() {
    logging::init_logger();

    let data = env::var("BOLETERA_DATA").unwrap_or_else(|_| DEFAULT_DATA.to_string());
    let overrides = env::var("BOLETERA_OVERRIDES").unwrap_or_else(|_| DEFAULT_OVERRIDES.to_string());

    let store = JsonFileStore::open(overrides)
        .await
        .expect("override store opens");

    let system = Boletera::new(CatalogSources::from_base(&data), store);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(login) = prompt(&mut lines, "Login: ") else {
            return;
        };
        let Some(password) = prompt(&mut lines, "Contraseña: ") else {
            return;
        };

        let view = match system.login(&Credentials { login, password }).await {
            Ok(view) => view,
            Err(LoginError::Auth(e)) => {
                render::error(&e.to_string());
                continue;
            }
            Err(e) => {
                log::error!("the catalog could not be loaded: {}", e);
                std::process::exit(1);
            }
        };

        render::wallet(&view);

        if !command_loop(&system, &mut lines).await {
            return;
        }
    }
}

/// Handles commands for a signed-in session. Returns whether the
/// login form should be shown again.
async fn command_loop<S>(system: &Boletera<S>, lines: &mut impl Iterator<Item = io::Result<String>>) -> bool
where
    S: boletera_core::KeyValueStore,
{
    println!();
    println!("Comandos: tiquetes · imagen <idEvento> <url> · login · salir");

    loop {
        let Some(line) = prompt(lines, "> ") else {
            return false;
        };

        let mut words = line.split_whitespace();

        match words.next() {
            Some("tiquetes") => rerender(system).await,
            Some("imagen") => {
                let (Some(event_id), Some(url)) = (words.next(), words.next()) else {
                    render::error("Uso: imagen <idEvento> <url>");
                    continue;
                };

                match system.set_event_image(event_id, url).await {
                    Ok(true) => rerender(system).await,
                    Ok(false) => {}
                    Err(e) => log::error!("the override could not be saved: {}", e),
                }
            }
            Some("login") => return true,
            Some("salir") => return false,
            Some(_) => render::error("Comando desconocido."),
            None => {}
        }
    }
}

async fn rerender<S>(system: &Boletera<S>)
where
    S: boletera_core::KeyValueStore,
{
    match system.wallet().await {
        Ok(Some(view)) => render::wallet(&view),
        Ok(None) => {}
        Err(e) => log::error!("the wallet could not be rendered: {}", e),
    }
}

/// Prints a label and reads one line, returning None at end of input
fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, label: &str) -> Option<String> {
    print!("{}", label);
    io::stdout().flush().ok();

    lines.next().and_then(|line| line.ok())
}
