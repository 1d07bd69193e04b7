use glam::Vec3;
use prefab_unfold::prelude::*;
use prefab_unfold_examples::{init_tracing, render_expansion_to_png, NodeStyle, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // One tree slot drawn from three variants, with a chance of staying
    // empty.
    let mut catalog = InMemoryCatalog::new();
    catalog.register_instance("oak_mesh", "meshes/oak");
    catalog.register_instance("pine_mesh", "meshes/pine");
    catalog.register_instance("birch_mesh", "meshes/birch");

    let tree = CompositionAsset::new("tree", EvaluationMode::Superposition)
        .with_nothing_weight(1.0)
        .with_element(
            CompositionElement::new("oak", "oak_mesh")
                .with_weight(3.0)
                .with_scale_jitter(0.8, 1.4)
                .with_spin_about_up(true),
        )
        .with_element(
            CompositionElement::new("pine", "pine_mesh")
                .with_weight(2.0)
                .with_scale_jitter(0.9, 1.8)
                .with_spin_about_up(true),
        )
        .with_element(
            CompositionElement::new("birch", "birch_mesh")
                .with_weight(1.0)
                .with_scale_jitter(0.7, 1.1)
                .with_spin_about_up(true),
        );
    catalog.register_composition("tree", tree);

    // A 12x12 grid of slots, each expanding the tree asset independently.
    let mut forest = CompositionAsset::new("forest", EvaluationMode::Composition);
    let spacing = 8.0;
    for row in 0..12 {
        for col in 0..12 {
            let x = (col as f32 - 5.5) * spacing;
            let z = (row as f32 - 5.5) * spacing;
            forest.add_element(
                CompositionElement::new(format!("slot_{row}_{col}"), "tree")
                    .with_translation(Vec3::new(x, 0.0, z)),
            );
        }
    }
    let root = catalog.register_composition("forest", forest);

    let filter = FilterSampler::default();
    let runner = ExpansionRunner::try_new(ExpandConfig::default(), &catalog, &filter)?;

    let mut config = RenderConfig::new((1000, 1000), 110.0);
    config.set_style("oak", NodeStyle::Circle { color: [96, 176, 80], radius: 6 });
    config.set_style("pine", NodeStyle::Circle { color: [48, 112, 72], radius: 5 });
    config.set_style("birch", NodeStyle::Circle { color: [208, 216, 176], radius: 4 });

    // Two seeds, two forests: every slot re-rolls its variant.
    for seed in [2025, 2026] {
        let expansion = runner.run(&root, seed);
        println!(
            "seed {seed}: {} trees placed, {} slots empty",
            expansion.recipe.len(),
            144 - expansion.recipe.len()
        );

        let out = format!("superposition-variants-{seed}.png");
        render_expansion_to_png(&expansion, &config, &out)?;
        println!("wrote {out}");
    }

    Ok(())
}
