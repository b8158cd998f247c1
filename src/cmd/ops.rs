/*!
`ops`: list the operation catalog (name, subcommand path, output kind).

Does not run the program, so it works without a configured binary.
*/

use anyhow::Result;
use boostwrap::{CATALOG, Descriptor, OutputKind};

use crate::cmd::format::{StyleOptions, box_header, emoji, table};
use crate::cmd::shared::Globals;

pub fn execute_ops(globals: &Globals) -> Result<()> {
    if globals.json {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "count": CATALOG.len(),
                "operations": CATALOG,
            })
        );
        return Ok(());
    }

    let style = StyleOptions::detect();
    println!(
        "{}",
        box_header(
            format!("{} Operations ({})", emoji("list", &style), CATALOG.len()),
            None::<&str>,
            &style,
        )
    );
    let rows: Vec<Vec<String>> = CATALOG.iter().map(catalog_row).collect();
    println!(
        "{}",
        table(&["NAME", "COMMAND", "OUTPUT", "SUMMARY"], &rows, &style)
    );
    Ok(())
}

fn catalog_row(d: &Descriptor) -> Vec<String> {
    let output = match d.output {
        OutputKind::None => "-",
        OutputKind::Record => "record",
        OutputKind::Json => "json",
    };
    vec![
        d.name.to_string(),
        d.command(),
        output.to_string(),
        d.summary.to_string(),
    ]
}
