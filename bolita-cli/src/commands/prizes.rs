use bolita_core::EngineConfig;
use comfy_table::{presets::UTF8_FULL, Table};

pub fn handle_prizes(config: &EngineConfig, json: bool) -> anyhow::Result<()> {
    let prizes = config.prize_table();

    if json {
        println!("{}", serde_json::to_string_pretty(&prizes)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Game", "Match", "Pays per $1"]);

    for (mode, labels) in prizes.entries() {
        for (label, multiplier) in labels {
            table.add_row(vec![
                mode.clone(),
                label.clone(),
                format!("{:.2}", multiplier),
            ]);
        }
    }

    println!("{}", table);
    Ok(())
}
