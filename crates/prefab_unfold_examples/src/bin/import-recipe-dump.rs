use prefab_unfold::prelude::*;
use prefab_unfold_examples::init_tracing;

// The kind of document a procedural tool exports: placements only, no
// weights or jitter.
const SCATTER_DOC: &str = r#"{
    "EvaluationMode": "Composition",
    "Elements": [
        {
            "Name": "boulder_a",
            "AssetReference": "meshes/boulder_a",
            "Translate": [4.0, 0.0, -2.5],
            "Scale": 1.25,
            "Orient": [0.0, 0.3826834, 0.0, 0.9238795]
        },
        {
            "Name": "boulder_b",
            "AssetReference": "meshes/boulder_b",
            "Translate": [-3.0, 0.0, 6.0],
            "Scale": 0.8,
            "Orient": [0.0, 0.0, 0.0, 1.0]
        },
        {
            "Name": "pebbles",
            "AssetReference": "pebble_scatter",
            "Translate": [0.0, 0.0, 0.0],
            "Scale": 1.0,
            "Orient": [0.0, 0.0, 0.0, 1.0]
        }
    ]
}"#;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let imported = import_composition_str("rock_garden", SCATTER_DOC)?;
    println!(
        "imported '{}' with {} elements ({:?})",
        imported.name,
        imported.elements.len(),
        imported.mode
    );

    let mut catalog = InMemoryCatalog::new();
    catalog.register_instance("meshes/boulder_a", "meshes/boulder_a");
    catalog.register_instance("meshes/boulder_b", "meshes/boulder_b");
    catalog.register_batch("pebble_scatter", "pebbles");
    let root = catalog.register_composition("rock_garden", imported);

    let filter = FilterSampler::default();
    let runner = ExpansionRunner::try_new(ExpandConfig::default(), &catalog, &filter)?;
    let expansion = runner.run(&root, 7);

    println!("recipe tree:");
    for (id, parent, node) in expansion.recipe.iter_depth_first() {
        match parent {
            Some(parent) => println!("  [{id}<-{parent}] {} -> {:?}", node.name, node.target),
            None => println!("  [{id}] {} -> {:?}", node.name, node.target),
        }
    }

    let json = serde_json::to_string_pretty(&expansion.recipe)?;
    let out = "import-recipe-dump.json";
    std::fs::write(out, &json)?;

    println!(
        "expanded to {} recipe nodes and {} batched instances",
        expansion.recipe.node_count(),
        expansion.batches.instance_count()
    );
    println!("wrote {out}");

    Ok(())
}
