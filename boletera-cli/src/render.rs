//! Turns the wallet descriptions into terminal output. All the logic
//! lives in boletera-core; this only attaches it to stdout.

use boletera_core::{TicketCard, WalletView};
use colored::Colorize;
use qrcode::{render::unicode, QrCode};

pub fn wallet(view: &WalletView) {
    println!();
    println!("{}", view.greeting.bold());
    println!(
        "{}  {}",
        chip(&view.stats.count_chip()),
        chip(&view.stats.total_chip())
    );

    for card in &view.cards {
        ticket_card(card);
    }
}

pub fn error(message: &str) {
    println!("{}", message.red());
}

fn chip(text: &str) -> String {
    format!("[ {} ]", text).cyan().to_string()
}

fn ticket_card(card: &TicketCard) {
    println!();
    println!("{}", card.eyebrow.bright_black());
    println!("{}  {}", card.title.bold(), card.tag.yellow());
    println!("{}", card.meta);
    println!("{}", card.price.green());
    println!("{} {}", "Imagen:".bright_black(), card.image_url);

    for detail in &card.details {
        let label = format!("{:<16}", detail.label);
        println!("  {} {}", label.bright_black(), detail.value);
    }

    println!("{}", qr_block(&card.qr_payload));
}

/// Renders the scannable code for a payload as a unicode block.
/// The encoding itself is entirely the qrcode crate's business.
fn qr_block(payload: &str) -> String {
    match QrCode::new(payload) {
        Ok(code) => code
            .render::<unicode::Dense1x2>()
            .quiet_zone(false)
            .build(),
        Err(e) => {
            log::warn!("could not encode QR payload: {}", e);
            String::new()
        }
    }
}
