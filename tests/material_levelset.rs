use mesh_metric::materials::{
    DEFAULT_CHILDREN, LevelSetPolicy, MINUS_DEFAULT, MaterialDescriptor, MaterialTable,
    MultiMaterialConfig, PLUS_DEFAULT, SplitDecision, SplitRole,
};
use mesh_metric::mesh_error::MeshMetricError;

fn scenario() -> MultiMaterialConfig {
    MultiMaterialConfig::from_materials(vec![
        MaterialDescriptor::split(1, 10, 11),
        MaterialDescriptor::keep(2),
    ])
}

#[test]
fn end_to_end_scenario() {
    let policy = LevelSetPolicy::from_config(scenario()).unwrap();
    assert!(policy.is_multi_material());

    assert_eq!(policy.should_split(1).as_tuple(), (true, Some(10), Some(11)));
    assert!(!policy.should_split(2).splits());
    assert_eq!(policy.should_split(99), SplitDecision::Split(DEFAULT_CHILDREN));
    assert_eq!(
        policy.should_split(99).as_tuple(),
        (true, Some(MINUS_DEFAULT), Some(PLUS_DEFAULT))
    );
    assert!(policy.straddles_level_set(10, 11));
    assert!(!policy.straddles_level_set(10, 2));
    assert_eq!(policy.original_reference_of(10), 1);
}

#[test]
fn table_records_children_and_parents() {
    let config = MultiMaterialConfig::from_materials(vec![
        MaterialDescriptor::split(4, 20, 21),
        MaterialDescriptor::keep(7),
        MaterialDescriptor::split(0, 5, 6),
    ]);
    let table = MaterialTable::build(&config).unwrap();
    assert_eq!(table.offset(), 0);
    assert_eq!(table.len(), 22);

    for m in &config.materials {
        match m.children {
            Some(c) => {
                assert_eq!(table.role_of(m.reference), Some(SplitRole::Split));
                assert_eq!(table.role_of(c.interior), Some(SplitRole::Minus));
                assert_eq!(table.role_of(c.exterior), Some(SplitRole::Plus));
                assert_eq!(table.parent_of(c.interior), Some(m.reference));
                assert_eq!(table.parent_of(c.exterior), Some(m.reference));
            }
            None => assert_eq!(table.role_of(m.reference), Some(SplitRole::NoSplit)),
        }
        assert_eq!(table.parent_of(m.reference), None);
    }
    assert_eq!(table.role_of(22), None);
    assert_eq!(table.role_of(-1), None);
}

#[test]
fn incomplete_configuration_builds_nothing() {
    let mut config = MultiMaterialConfig::with_declared(3);
    config.push(MaterialDescriptor::split(1, 10, 11));
    config.push(MaterialDescriptor::keep(2));
    assert_eq!(
        LevelSetPolicy::from_config(config.clone()).unwrap_err(),
        MeshMetricError::ConfigurationIncomplete {
            supplied: 2,
            declared: 3
        }
    );

    config.push(MaterialDescriptor::keep(3));
    assert!(LevelSetPolicy::from_config(config).is_ok());
}

#[test]
fn shared_child_reference_is_rejected() {
    let config = MultiMaterialConfig::from_materials(vec![
        MaterialDescriptor::split(1, 10, 11),
        MaterialDescriptor::split(2, 10, 12),
    ]);
    assert_eq!(
        MaterialTable::build(&config),
        Err(MeshMetricError::DuplicateReferenceConflict {
            reference: 10,
            first: 1,
            second: 2
        })
    );
}

#[test]
fn other_configuration_errors() {
    let twice = MultiMaterialConfig::from_materials(vec![
        MaterialDescriptor::keep(3),
        MaterialDescriptor::split(3, 4, 5),
    ]);
    assert_eq!(
        MaterialTable::build(&twice),
        Err(MeshMetricError::DuplicateMaterial(3))
    );

    let negative =
        MultiMaterialConfig::from_materials(vec![MaterialDescriptor::split(1, -2, 3)]);
    assert_eq!(
        MaterialTable::build(&negative),
        Err(MeshMetricError::NegativeReference(-2))
    );

    let child_is_original = MultiMaterialConfig::from_materials(vec![
        MaterialDescriptor::split(1, 2, 3),
        MaterialDescriptor::keep(2),
    ]);
    assert!(matches!(
        MaterialTable::build(&child_is_original),
        Err(MeshMetricError::DuplicateReferenceConflict { reference: 2, .. })
    ));
}

#[test]
fn child_may_reuse_its_parent_reference() {
    let config = MultiMaterialConfig::from_materials(vec![MaterialDescriptor::split(5, 5, 6)]);
    let policy = LevelSetPolicy::from_config(config).unwrap();
    let table = policy.table().unwrap();
    assert_eq!(table.role_of(5), Some(SplitRole::Minus));
    assert_eq!(table.parent_of(5), Some(5));
    assert_eq!(policy.original_reference_of(5), 5);
    assert!(policy.straddles_level_set(6, 5));
}

#[test]
fn configuration_loads_from_json() {
    let json = r#"{
        "declared": 2,
        "materials": [
            { "reference": 1, "children": { "interior": 10, "exterior": 11 } },
            { "reference": 2, "children": null }
        ]
    }"#;
    let config: MultiMaterialConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config, scenario());
}
