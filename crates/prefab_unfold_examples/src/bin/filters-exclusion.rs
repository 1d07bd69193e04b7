use std::sync::Arc;

use glam::Vec3;
use prefab_unfold::prelude::*;
use prefab_unfold_examples::{init_tracing, render_expansion_to_png, NodeStyle, RenderConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut catalog = InMemoryCatalog::new();
    catalog.register_batch("bush_ref", "bush");

    // A dense field of bush candidates on a jittered grid. The grid jitter
    // is baked into the element transforms from a fixed rng seed, so the
    // asset itself stays deterministic.
    let mut rng = StdRng::seed_from_u64(4242);
    let mut field = CompositionAsset::new("field", EvaluationMode::Composition);
    let spacing = 3.0;
    for row in 0..40 {
        for col in 0..40 {
            let x = (col as f32 - 19.5) * spacing + rng.random_range(-0.8..0.8);
            let z = (row as f32 - 19.5) * spacing + rng.random_range(-0.8..0.8);
            field.add_element(
                CompositionElement::new(format!("bush_{row}_{col}"), "bush_ref")
                    .with_translation(Vec3::new(x, 0.0, z))
                    .with_weight(0.85),
            );
        }
    }
    let root = catalog.register_composition("field", field);

    // Carve out a pond, a road corridor, and a rectangular build plot.
    let mut filter = FilterSampler::default();
    filter.add_cylinder_exclusion(Vec3::new(-25.0, 0.0, -20.0), 14.0);
    filter.add_curve_proximity(
        Arc::new(PolylineCurve::new(vec![
            Vec3::new(-60.0, 0.0, 40.0),
            Vec3::new(-10.0, 0.0, 10.0),
            Vec3::new(30.0, 0.0, 25.0),
            Vec3::new(60.0, 0.0, 15.0),
        ])),
        6.0,
    );
    filter.add_volume_exclusion(Arc::new(AxisAlignedBox::from_center_half_extents(
        Vec3::new(25.0, 0.0, -25.0),
        Vec3::new(12.0, 10.0, 9.0),
    )));

    let runner = ExpansionRunner::try_new(ExpandConfig::default(), &catalog, &filter)?;
    let expansion = runner.run(&root, 424242);

    println!(
        "{} bushes placed, {} vetoed of {} candidates",
        expansion.batches.instance_count(),
        expansion.elements_vetoed,
        expansion.elements_evaluated
    );

    let config = RenderConfig::new((1000, 1000), 125.0)
        .with_default_style(NodeStyle::Circle { color: [90, 150, 70], radius: 3 });

    let out = "filters-exclusion.png";
    render_expansion_to_png(&expansion, &config, out)?;
    println!("wrote {out}");

    Ok(())
}
