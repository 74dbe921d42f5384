use anyhow::Result;
use cli_table::{print_stdout, Cell, CellStruct, Style, Table};
use tacowave_core::{HParams, Origin, Render};

fn marker(origin: Origin, render: Render) -> &'static str {
    match (origin, render) {
        (_, Render::Bulk) => "bulk",
        (Origin::Derived, _) => "derived",
        (Origin::Computed, _) => "computed",
        (Origin::Input, _) => "",
    }
}

/// Print every schema row with its compiled-in default.
pub fn print_schema() -> Result<()> {
    let defaults = HParams::default();
    let rows: Vec<Vec<CellStruct>> = HParams::schema()
        .iter()
        .map(|spec| {
            let default = match spec.render {
                Render::Bulk => "...".to_string(),
                Render::Scalar => defaults
                    .get(spec.name)
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            };
            vec![
                spec.name.cell(),
                (spec.kind)().cell(),
                default.cell(),
                marker(spec.origin, spec.render).cell(),
                spec.doc_lines().collect::<Vec<_>>().join(" ").cell(),
            ]
        })
        .collect();

    let table = rows
        .table()
        .title(vec![
            "name".cell().bold(true),
            "type".cell().bold(true),
            "default".cell().bold(true),
            "".cell().bold(true),
            "description".cell().bold(true),
        ])
        .bold(true);
    print_stdout(table)?;
    Ok(())
}
