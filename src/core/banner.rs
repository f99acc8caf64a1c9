//! Startup banner, in the teacher's `core::banner` style: a short colored
//! block printed once the server is about to start listening.

use super::constants::APP_NAME;

pub fn print_banner(host: &str, port: u16, view_products: usize) {
    println!();
    println!("  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m", APP_NAME, env!("CARGO_PKG_VERSION"));
    println!();
    println!(
        "  \x1b[32m\u{27a4}\x1b[0m  \x1b[1m{:<12}\x1b[0m http://{}:{}",
        "Listening:", host, port
    );
    println!(
        "  \x1b[90m\u{27a4}  {:<12} {} generic-view products configured\x1b[0m",
        "Schemas:", view_products
    );
    println!();
}
