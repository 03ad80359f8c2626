use archetype_store::{create_entity, EntityBuilder, EntityStore};

#[test]
fn build() {
    let mut store = EntityStore::new();

    let entity = EntityBuilder::new()
        .with([0i32, 1, 10, 15])
        .with(10u128)
        .with([10usize; 32])
        .spawn_in(&mut store)
        .unwrap();

    assert_eq!(store.get::<[i32; 4]>(entity), Some(&[0, 1, 10, 15]));
    assert_eq!(store.get::<u128>(entity), Some(&10));
    assert_eq!(store.get::<[usize; 32]>(entity), Some(&[10usize; 32]));
}

#[test]
fn builder_is_reusable() {
    let mut store = EntityStore::new();

    let mut builder = EntityBuilder::new().with(10i32);
    let entity = builder.spawn_in(&mut store).unwrap();
    assert_eq!(store.get::<i32>(entity), Some(&10));

    builder.clear();
    builder.add(11i32).add(0.5f32);
    assert_eq!(builder.len(), 2);

    let entity2 = builder.spawn_in(&mut store).unwrap();
    let entity3 = builder.spawn_in(&mut store).unwrap();
    assert_eq!(store.get::<i32>(entity2), Some(&11));
    assert_eq!(store.get::<f32>(entity3), Some(&0.5));

    assert_eq!(store.archetype_count(), 2);
    assert_eq!(store.len(), 3);
}

#[test]
fn builder_and_tuple_share_archetype() {
    let mut store = EntityStore::new();

    EntityBuilder::new()
        .with(1u16)
        .with(2u64)
        .spawn_in(&mut store)
        .unwrap();
    create_entity!(store, 3u64, 4u16).unwrap();

    assert_eq!(store.archetype_count(), 1);

    let query = store.query::<(u16, u64)>().unwrap();
    let chunk = query.chunks().next().unwrap();
    let (small, large) = chunk.columns();
    assert_eq!(small.as_slice(), [1, 4]);
    assert_eq!(large.as_slice(), [2, 3]);
}
