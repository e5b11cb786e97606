//! Command implementations.

pub mod cart;
pub mod catalog;

use std::io::Write;

use serde::Serialize;

/// Write `value` to stdout as pretty JSON.
fn emit<T: Serialize + ?Sized>(value: &T) -> freshcart_storefront::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
