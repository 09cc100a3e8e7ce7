use anyhow::Result;
use portal_config::PreferenceStore;
use portal_core::RecordKind;

use crate::cli::PrefsCommands;

pub fn handle(cmd: PrefsCommands, prefs: &mut PreferenceStore) -> Result<()> {
    match cmd {
        PrefsCommands::Show => {
            show(prefs);
            Ok(())
        }
        PrefsCommands::SetPageSize { view, size } => {
            prefs.set_page_size(view.view_key(), size)?;
            prefs.save()?;
            println!("✓ {view}: {size} records per page");
            Ok(())
        }
        PrefsCommands::SetViewMode { view, mode } => {
            prefs.set_view_mode(view.view_key(), mode);
            prefs.save()?;
            println!("✓ {view}: {mode} view");
            Ok(())
        }
    }
}

fn show(prefs: &PreferenceStore) {
    println!("Preferences ({}):", prefs.path().display());
    for kind in RecordKind::ALL {
        let key = kind.view_key();
        let size = match prefs.page_size(key) {
            Some(size) => size.to_string(),
            None => format!("{} (default)", kind.default_page_size()),
        };
        println!("  {key:<10} page size {size:<14} view {}", prefs.view_mode(key));
    }
}
