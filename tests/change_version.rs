use archetype_store::{EntityStore, InvalidArgument, StoreConfig, StoreError};

#[derive(Debug, Copy, Clone, PartialEq)]
struct Position {
    x: f32,
    y: f32,
    z: f32,
}

impl Position {
    fn new(x: f32, y: f32, z: f32) -> Self {
        Position { x, y, z }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
struct Rotation {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

#[test]
fn change_version_basic() {
    let mut store = EntityStore::new();
    store.create_entity((Position::new(1.0, 2.0, 3.0),)).unwrap();

    {
        let query = store.query::<(Position,)>().unwrap();
        for chunk in &query {
            assert_eq!(chunk.columns().0.change_version(), 0);
        }
    }

    store.set_global_system_version(1);

    let query = store.query::<(Position,)>().unwrap();
    for chunk in &query {
        chunk.columns().0.set_change_version(query.global_system_version());
    }

    for chunk in &query {
        assert_eq!(chunk.columns().0.change_version(), 1);
    }
}

#[test]
fn change_version_multiple_archetypes() {
    let mut store = EntityStore::new();
    store.set_global_system_version(100);

    let e1 = store.create_entity((Position::new(1.0, 0.0, 0.0),)).unwrap();
    let e2 = store
        .create_entity((Position::new(2.0, 0.0, 0.0), Rotation::default()))
        .unwrap();

    let query = store.query::<(Position,)>().unwrap();

    let mut chunk_count = 0;
    for chunk in &query {
        chunk_count += 1;
        let (positions,) = chunk.columns();
        if chunk.len() == 1 && positions[0].x == 1.0 {
            positions.set_change_version(store.global_system_version());
        }
    }
    assert_eq!(chunk_count, 2);

    for chunk in &query {
        let (positions,) = chunk.columns();
        assert_eq!(chunk.len(), 1);
        if positions[0].x == 1.0 {
            assert_eq!(chunk.entities(), [e1]);
            assert_eq!(positions.change_version(), 100);
        } else {
            assert_eq!(chunk.entities(), [e2]);
            assert_eq!(positions.change_version(), 0);
        }
    }
}

#[test]
fn set_change_version_overwrites() {
    let mut store = EntityStore::new();
    store.create_entity((Position::new(0.0, 0.0, 0.0),)).unwrap();

    let query = store.query::<(Position,)>().unwrap();
    let (positions,) = query.chunks().next().unwrap().columns();

    positions.set_change_version(50);
    assert_eq!(positions.change_version(), 50);
    positions.set_change_version(7);
    assert_eq!(positions.change_version(), 7);
    assert!(positions.changed_since(6));
    assert!(!positions.changed_since(7));
}

#[test]
fn stamping_is_isolated_per_chunk_and_component() {
    let config = StoreConfig::default().with_chunk_capacity(2);
    let mut store = EntityStore::with_config(config).unwrap();
    for i in 0..4 {
        store
            .create_entity((Position::new(i as f32, 0.0, 0.0), Rotation::default()))
            .unwrap();
    }

    let query = store.query::<(Position, Rotation)>().unwrap();
    let first = query.chunks().next().unwrap();
    first.columns().0.set_change_version(9);

    let versions: Vec<_> = query
        .chunks()
        .map(|chunk| {
            let (positions, rotations) = chunk.columns();
            (positions.change_version(), rotations.change_version())
        })
        .collect();
    assert_eq!(versions, [(9, 0), (0, 0)]);
}

#[test]
fn repeated_passes_yield_same_chunks() {
    let mut store = EntityStore::new();
    store.create_entity((Position::new(1.0, 0.0, 0.0),)).unwrap();
    store
        .create_entity((Rotation::default(), Position::new(2.0, 0.0, 0.0)))
        .unwrap();
    store.create_entity((Rotation::default(),)).unwrap();

    let query = store.query::<(Position,)>().unwrap();
    let collect = || -> Vec<(usize, Vec<Position>)> {
        query
            .chunks()
            .map(|chunk| (chunk.len(), chunk.columns().0.iter().copied().collect()))
            .collect()
    };

    let first = collect();
    let second = collect();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(query.count(), 2);
}

#[test]
fn query_sees_entities_created_between_passes() {
    let mut store = EntityStore::new();
    store.create_entity((Position::new(1.0, 0.0, 0.0),)).unwrap();
    assert_eq!(store.query::<(Position,)>().unwrap().chunks().count(), 1);

    store
        .create_entity((Position::new(2.0, 0.0, 0.0), Rotation::default()))
        .unwrap();
    assert_eq!(store.query::<(Position,)>().unwrap().chunks().count(), 2);
    assert_eq!(store.query::<(Rotation,)>().unwrap().chunks().count(), 1);
}

#[test]
fn query_without_matches_is_empty() {
    let mut store = EntityStore::new();
    store.create_entity((Position::new(1.0, 0.0, 0.0),)).unwrap();

    let query = store.query::<(Rotation,)>().unwrap();
    assert_eq!(query.chunks().count(), 0);
}

#[test]
fn query_with_repeated_type_fails() {
    let store = EntityStore::new();
    let result = store.query::<(Position, Rotation, Position)>();

    assert!(matches!(
        result.err(),
        Some(StoreError::InvalidArgument(
            InvalidArgument::DuplicateComponent { .. }
        ))
    ));
}

#[test]
fn duplicate_components_fail_without_mutation() {
    let mut store = EntityStore::new();

    let result = store.create_entity((Position::new(1.0, 0.0, 0.0), Position::new(2.0, 0.0, 0.0)));
    assert!(matches!(result, Err(StoreError::InvalidArgument(_))));

    assert!(store.is_empty());
    assert_eq!(store.archetype_count(), 0);
    assert_eq!(store.query::<(Position,)>().unwrap().chunks().count(), 0);
}

#[test]
fn stores_keep_separate_system_versions() {
    let mut a = EntityStore::new();
    let b = EntityStore::new();

    a.set_global_system_version(3);
    assert_eq!(a.global_system_version(), 3);
    assert_eq!(b.global_system_version(), 0);
}

#[test]
fn removal_keeps_moved_entity_change_visible() {
    let config = StoreConfig::default().with_chunk_capacity(2);
    let mut store = EntityStore::with_config(config).unwrap();
    let entities: Vec<_> = (0..3)
        .map(|i| store.create_entity((i as u32,)).unwrap())
        .collect();

    {
        let mut query = store.query_mut::<(u32,)>().unwrap();
        let mut last = query.chunks_mut().last().unwrap();
        let (mut values,) = last.columns_mut();
        values[0] = 200;
        values.set_change_version(5);
    }

    store.remove_entity(entities[0]).unwrap();
    assert_eq!(store.get::<u32>(entities[2]), Some(&200));

    let query = store.query::<(u32,)>().unwrap();
    let chunks: Vec<_> = query
        .chunks()
        .map(|chunk| {
            let (values,) = chunk.columns();
            (values.as_slice().to_vec(), values.change_version())
        })
        .collect();
    assert_eq!(chunks, [(vec![200, 1], 5)]);
    assert!(query.chunks().all(|chunk| chunk.columns().0.changed_since(4)));
}

#[test]
fn removal_keeps_newer_destination_version() {
    let config = StoreConfig::default().with_chunk_capacity(2);
    let mut store = EntityStore::with_config(config).unwrap();
    let entities: Vec<_> = (0..3)
        .map(|i| store.create_entity((i as u32,)).unwrap())
        .collect();

    {
        let query = store.query::<(u32,)>().unwrap();
        query.chunks().next().unwrap().columns().0.set_change_version(8);
    }

    store.remove_entity(entities[1]).unwrap();

    let query = store.query::<(u32,)>().unwrap();
    let (values,) = query.chunks().next().unwrap().columns();
    assert_eq!(values.as_slice(), [0, 2]);
    assert_eq!(values.change_version(), 8);
}
