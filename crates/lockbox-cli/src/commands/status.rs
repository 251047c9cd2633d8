use lockbox_core::UserStore;

use crate::app::AppContext;
use crate::cli::StatusArgs;
use crate::ui;

/// Show where the store lives and how many accounts it holds.
pub fn handle_status(ctx: &AppContext, args: &StatusArgs) -> anyhow::Result<()> {
    let path = ctx.store_path()?;
    let exists = path.exists();
    let vault = ctx.open_vault()?;

    let accounts = vault.store().usernames()?;

    if args.json {
        let payload = serde_json::json!({
            "store": path.display().to_string(),
            "exists": exists,
            "accounts": accounts.len(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    ui::print_info(&format!("Store: {}", path.display()));
    if !exists {
        ui::print_warning("The store file does not exist yet; it is created on first write.");
    }
    match accounts.len() {
        0 => ui::print_info("Accounts: none"),
        n => ui::print_info(&format!("Accounts: {}", n)),
    }
    Ok(())
}
