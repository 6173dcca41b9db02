use std::path::Path;

use externalize_core::Settings;

pub fn run(settings_path: &Path) -> anyhow::Result<()> {
    let settings = Settings::load(settings_path)?;
    print!("{}", describe(&settings)?);
    Ok(())
}

fn describe(settings: &Settings) -> anyhow::Result<String> {
    // Fails on settings the default preset rejects
    settings.to_configuration()?;

    let mut out = String::from("Settings OK\n");
    out.push_str(&format!("Namespaces ({}):\n", settings.namespaces.len()));
    for namespace in &settings.namespaces {
        out.push_str(&format!("  {namespace}\n"));
    }

    out.push_str(&format!("Declared types ({}):\n", settings.declarations.len()));
    for (type_name, route) in &settings.declarations {
        if route.trim().is_empty() {
            out.push_str(&format!("  {type_name} (default route)\n"));
        } else {
            out.push_str(&format!("  {type_name} -> {route}\n"));
        }
    }

    out.push_str(&format!(
        "Resolvers: {}\n",
        settings.resolver_chain().names().join(", ")
    ));
    Ok(out)
}
