//! End-to-end pricing scenarios against the demo catalog.

use pcforge_core::build::compute_total_cost;
use pcforge_core::prelude::*;

const DEMO_CATALOG: &str = include_str!("../../../demos/catalog.toml");

fn demo_catalog() -> Catalog {
    Catalog::from_toml_str(DEMO_CATALOG).unwrap()
}

fn pick(catalog: &Catalog, ids: &[&str]) -> BuildSelection {
    let ids: Vec<ComponentId> = ids.iter().map(|id| ComponentId::from(*id)).collect();
    BuildSelection::from_catalog(catalog, &ids).unwrap()
}

fn cpu_and_board(board_socket: &str) -> BuildSelection {
    vec![
        Component::new("cpu", "CPU", 25000, ComponentSpec::cpu("LGA1700")),
        Component::new(
            "mb",
            "Motherboard",
            18000,
            ComponentSpec::motherboard(board_socket, "DDR5"),
        ),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_demo_catalog_loads() {
    let catalog = demo_catalog();
    assert_eq!(catalog.len(), 24);
    for category in Category::ALL {
        assert_eq!(catalog.components(category).len(), 3, "{}", category);
    }
}

#[test]
fn test_matching_cpu_and_board_with_percentage_markup() {
    let selection = cpu_and_board("LGA1700");
    let evaluation = evaluate_build(&selection, &Markup::percentage(15.0).unwrap()).unwrap();

    assert_eq!(evaluation.total_cost, 43000);
    assert_eq!(evaluation.final_price, 49450);
    assert_eq!(evaluation.profit, 6450);
    assert!(evaluation.issues.is_empty());
    assert!(evaluation.is_compatible);
}

#[test]
fn test_socket_mismatch_leaves_prices_unchanged() {
    let selection = cpu_and_board("AM5");
    let evaluation = evaluate_build(&selection, &Markup::percentage(15.0).unwrap()).unwrap();

    assert_eq!(evaluation.total_cost, 43000);
    assert_eq!(evaluation.final_price, 49450);
    assert_eq!(evaluation.profit, 6450);
    assert_eq!(evaluation.issues.len(), 1);
    assert_eq!(
        evaluation.issues[0].categories(),
        (Category::Cpu, Category::Motherboard)
    );
    assert!(!evaluation.is_compatible);
}

#[test]
fn test_psu_below_gpu_plus_baseline() {
    let mut selection = cpu_and_board("LGA1700");
    selection.select(Component::new("gpu", "RTX 4070", 55000, ComponentSpec::gpu(200)));
    selection.select(Component::new("psu", "300W", 12000, ComponentSpec::psu(300)));

    let issues = check_compatibility(&selection);
    assert_eq!(
        issues,
        vec![IncompatibilityIssue::PowerInsufficient {
            psu_power: 300,
            required_power: 350,
        }]
    );
}

#[test]
fn test_psu_above_gpu_plus_baseline() {
    let mut selection = cpu_and_board("LGA1700");
    selection.select(Component::new("gpu", "RTX 4070", 55000, ComponentSpec::gpu(200)));
    selection.select(Component::new("psu", "400W", 12000, ComponentSpec::psu(400)));

    let issues = check_compatibility(&selection);
    assert!(!issues
        .iter()
        .any(|issue| matches!(issue, IncompatibilityIssue::PowerInsufficient { .. })));
}

#[test]
fn test_negative_fixed_markup_is_not_rejected() {
    let selection = cpu_and_board("LGA1700");
    let evaluation = evaluate_build(&selection, &Markup::fixed(-50000.0).unwrap()).unwrap();

    assert_eq!(evaluation.total_cost, 43000);
    assert_eq!(evaluation.final_price, -7000);
    assert_eq!(evaluation.profit, -50000);
}

#[test]
fn test_empty_selection() {
    let empty = BuildSelection::new();

    let evaluation = evaluate_build(&empty, &Markup::none()).unwrap();
    assert_eq!(evaluation.total_cost, 0);
    assert_eq!(evaluation.final_price, 0);
    assert!(evaluation.issues.is_empty());

    let evaluation = evaluate_build(&empty, &Markup::fixed(2500.0).unwrap()).unwrap();
    assert_eq!(evaluation.final_price, 2500);
    assert_eq!(evaluation.profit, 2500);

    let evaluation = evaluate_build(&empty, &Markup::percentage(40.0).unwrap()).unwrap();
    assert_eq!(evaluation.final_price, 0);
}

#[test]
fn test_evaluation_is_idempotent() {
    let catalog = demo_catalog();
    let selection = pick(&catalog, &["3", "12", "8", "6", "21", "14", "24", "18"]);
    let markup = Markup::percentage(12.5).unwrap();

    let first = evaluate_build(&selection, &markup).unwrap();
    let second = evaluate_build(&selection, &markup).unwrap();
    assert_eq!(first, second);
    assert!(!first.issues.is_empty());
}

#[test]
fn test_adding_component_adds_exactly_its_price() {
    let catalog = demo_catalog();
    let mut selection = BuildSelection::new();
    let mut expected = 0;

    for id in ["1", "10", "8", "4", "19", "13", "22", "16"] {
        let component = catalog.require(&ComponentId::from(id)).unwrap().clone();
        let before = BuildPricer.total_cost(&selection).unwrap();
        expected += component.price;
        selection.select(component.clone());
        assert_eq!(BuildPricer.total_cost(&selection).unwrap(), before + component.price);
    }

    assert_eq!(BuildPricer.total_cost(&selection).unwrap(), expected);
    assert!(selection.is_complete());
}

#[test]
fn test_zero_markup_means_zero_profit() {
    let catalog = demo_catalog();
    let selections = [
        BuildSelection::new(),
        pick(&catalog, &["2", "11"]),
        pick(&catalog, &["1", "10", "8", "4", "19", "13", "22", "16"]),
    ];

    for selection in &selections {
        for markup in [Markup::percentage(0.0).unwrap(), Markup::fixed(0.0).unwrap()] {
            let evaluation = evaluate_build(selection, &markup).unwrap();
            assert_eq!(evaluation.final_price, evaluation.total_cost as i64);
            assert_eq!(evaluation.profit, 0);
        }
    }
}

#[test]
fn test_missing_side_of_pair_contributes_no_issue() {
    // No CPU: the cooler rule and the socket rule are skipped.
    let catalog = demo_catalog();
    let selection = pick(&catalog, &["11", "7", "22"]);

    let issues = check_compatibility(&selection);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].categories(), (Category::Ram, Category::Motherboard));
}

#[test]
fn test_issue_order_is_stable() {
    let selection: BuildSelection = vec![
        Component::new("c", "CPU", 1, ComponentSpec::cpu("AM4")),
        Component::new(
            "m",
            "Board",
            1,
            ComponentSpec::motherboard("LGA1700", "DDR5"),
        ),
        Component::new("r", "RAM", 1, ComponentSpec::ram("DDR4")),
        Component::new("g", "GPU", 1, ComponentSpec::gpu(450)),
        Component::new("p", "PSU", 1, ComponentSpec::psu(500)),
        Component::new("k", "Cooler", 1, ComponentSpec::cooler(["LGA1700"])),
    ]
    .into_iter()
    .collect();

    let first = check_compatibility(&selection);
    let second = check_compatibility(&selection);
    assert_eq!(first, second);

    let pairs: Vec<_> = first.iter().map(|issue| issue.categories()).collect();
    assert_eq!(
        pairs,
        vec![
            (Category::Cpu, Category::Motherboard),
            (Category::Ram, Category::Motherboard),
            (Category::Psu, Category::Gpu),
            (Category::Cpu, Category::Cooler),
        ]
    );
}

#[test]
fn test_stored_build_keeps_snapshot_prices() {
    let ids = ["2", "11", "8", "5", "20", "14", "23", "17"];
    let catalog = demo_catalog();
    let build = PcBuild::new(
        "Gaming AM5",
        "",
        pick(&catalog, &ids),
        Markup::fixed(10000.0).unwrap(),
    )
    .unwrap();
    assert_eq!(build.total_price(), 112500);

    let repriced: Vec<Component> = catalog
        .iter()
        .cloned()
        .map(|mut component| {
            component.price *= 2;
            component
        })
        .collect();
    let repriced = Catalog::from_components(repriced).unwrap();
    assert_eq!(compute_total_cost(&pick(&repriced, &ids)).unwrap(), 225000);

    let json = serde_json::to_string(&build).unwrap();
    let restored: PcBuild = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.total_price(), 112500);
    assert_eq!(restored.final_price(), 122500);
    assert_eq!(restored, build);
}
