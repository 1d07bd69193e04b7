use glam::Vec3;
use prefab_unfold::prelude::*;
use prefab_unfold_examples::{init_tracing, render_expansion_to_png, NodeStyle, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut catalog = InMemoryCatalog::new();
    catalog.register_instance("tent_mesh", "meshes/tent");
    catalog.register_instance("bedroll_mesh", "meshes/bedroll");
    catalog.register_instance("lantern_mesh", "meshes/lantern");
    catalog.register_instance("fire_mesh", "meshes/campfire");
    catalog.register_instance("log_mesh", "meshes/log_seat");
    catalog.register_batch("grass_ref", "grass_clump");

    // The tent anchors the site: gear that manifests after it nests
    // underneath, so a missing tent takes its gear with it.
    let site = CompositionAsset::new("site", EvaluationMode::HierarchicalComposition)
        .with_element(
            CompositionElement::new("tent", "tent_mesh")
                .with_weight(0.8)
                .with_spin_about_up(true),
        )
        .with_element(
            CompositionElement::new("bedroll", "bedroll_mesh")
                .with_translation(Vec3::new(1.5, 0.0, 0.5))
                .with_weight(0.9),
        )
        .with_element(
            CompositionElement::new("lantern", "lantern_mesh")
                .with_translation(Vec3::new(-1.0, 0.0, 1.0))
                .with_weight(0.5),
        );
    catalog.register_composition("site", site);

    let mut camp = CompositionAsset::new("camp", EvaluationMode::Composition)
        .with_element(CompositionElement::new("fire", "fire_mesh").with_translation(Vec3::ZERO))
        .with_element(
            CompositionElement::new("site_north", "site").with_translation(Vec3::new(0.0, 0.0, -9.0)),
        )
        .with_element(
            CompositionElement::new("site_east", "site").with_translation(Vec3::new(9.0, 0.0, 0.0)),
        )
        .with_element(
            CompositionElement::new("site_west", "site").with_translation(Vec3::new(-9.0, 0.0, 0.0)),
        );
    for index in 0..4 {
        let angle = std::f32::consts::FRAC_PI_2 * index as f32 + 0.4;
        camp.add_element(
            CompositionElement::new(format!("log_{index}"), "log_mesh")
                .with_translation(Vec3::new(angle.cos() * 3.0, 0.0, angle.sin() * 3.0))
                .with_weight(0.75),
        );
    }
    for index in 0..40 {
        let angle = index as f32 * 0.9;
        let distance = 5.0 + (index % 7) as f32 * 1.7;
        camp.add_element(
            CompositionElement::new(format!("grass_{index}"), "grass_ref")
                .with_translation(Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance))
                .with_weight(0.6),
        );
    }
    let root = catalog.register_composition("camp", camp);

    let filter = FilterSampler::default();
    let runner = ExpansionRunner::try_new(ExpandConfig::default(), &catalog, &filter)?;
    let expansion = runner.run(&root, 77);

    println!("recipe tree:");
    for (_, parent, node) in expansion.recipe.iter_depth_first() {
        let indent = if parent.is_some() { "    " } else { "  " };
        println!("{indent}{} @ {:?}", node.name, node.transform.translation);
    }
    println!(
        "{} nodes, {} grass instances batched",
        expansion.recipe.node_count(),
        expansion.batches.instance_count()
    );

    let mut config = RenderConfig::new((900, 900), 32.0);
    config.set_style("fire", NodeStyle::Circle { color: [235, 140, 52], radius: 8 });
    config.set_style("tent", NodeStyle::Square { color: [200, 180, 90], half: 9 });
    config.set_style("bedroll", NodeStyle::Square { color: [150, 110, 170], half: 4 });
    config.set_style("lantern", NodeStyle::Circle { color: [250, 240, 150], radius: 3 });
    config.set_style("grass_clump", NodeStyle::Circle { color: [80, 140, 60], radius: 2 });

    let out = "hierarchy-campsite.png";
    render_expansion_to_png(&expansion, &config, out)?;
    println!("wrote {out}");

    Ok(())
}
