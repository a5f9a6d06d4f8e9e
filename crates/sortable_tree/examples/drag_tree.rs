use anyhow::{Context as _, Result};
use sortable_tree::{
    DragPhase, ItemId, SortableTreeConfig, SortableTreeState, TreeItem, TreeRow,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ITEMS: &str = r#"[
    { "id": "Information", "children": [] },
    {
        "id": "Resume",
        "children": [
            { "id": "Internship", "children": [] },
            {
                "id": "Certificates",
                "children": [
                    { "id": "English C-1", "children": [] },
                    { "id": "Microsoft AZ-101", "children": [] }
                ]
            },
            { "id": "Experiences", "children": [] },
            { "id": "Hobbies", "children": [{ "id": "Football", "children": [] }] }
        ]
    },
    { "id": "About Us", "children": [] },
    {
        "id": "My Account",
        "children": [
            { "id": "Address", "children": [] },
            { "id": "Date of Birth", "children": [] }
        ]
    }
]"#;

const CONFIG: &str = r#"{ "indentation_width": 50, "collapsible": true, "removable": true }"#;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "sortable_tree=debug".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let items: Vec<TreeItem> = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("failed to parse {path}"))?
        }
        None => serde_json::from_str(DEFAULT_ITEMS).context("failed to parse default items")?,
    };
    let config: SortableTreeConfig = serde_json::from_str(CONFIG).context("bad config")?;
    let mut state = SortableTreeState::with_config(items, config)?;

    println!("== initial ==");
    print_rows(&state.rows());

    // Drag "About Us" up over "Hobbies" and one step to the right.
    let active = ItemId::from("About Us");
    let over = ItemId::from("Hobbies");
    let Some(DragPhase::Started { active_id }) = state.drag_start(&active) else {
        println!("\n{active} is not visible, nothing to drag");
        return Ok(());
    };
    println!("\n== dragging {active_id} over {over} ==");
    state.drag_over(Some(over));
    if let Some(DragPhase::Updated {
        projection: Some(projection),
    }) = state.drag_move(50.0)
    {
        println!(
            "projected depth {} (allowed {}..={}), parent {}",
            projection.depth,
            projection.min_depth,
            projection.max_depth,
            projection
                .parent_id
                .as_ref()
                .map_or("<root>", |id| id.as_str())
        );
    }
    print_rows(&state.rows());

    if let Some(DragPhase::Ended { moved }) = state.drag_end() {
        println!("\n== dropped (moved: {moved}) ==");
    }
    print_rows(&state.rows());

    println!("\n== forest ==");
    println!(
        "{}",
        serde_json::to_string_pretty(state.items()).context("failed to serialize forest")?
    );
    Ok(())
}

fn print_rows(rows: &[TreeRow]) {
    for row in rows {
        let marker = if row.ghost {
            '*'
        } else if row.collapsed {
            '+'
        } else if row.can_collapse {
            '-'
        } else {
            ' '
        };
        let badge = row
            .child_count
            .filter(|count| *count > 0)
            .map(|count| format!(" ({count})"))
            .unwrap_or_default();
        println!("{marker} {}{}{badge}", "    ".repeat(row.depth), row.id);
    }
}
