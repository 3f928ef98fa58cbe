//! Home block editor and theme edits.

#![allow(clippy::unwrap_used)]

use curated_core::{BlockContent, BlockId, MoveDirection, PageBlock, SiteSettings};
use curated_storefront::site::editor::{move_block, toggle_visibility};
use curated_storefront::site::{SettingsError, SettingsStore};

fn ids(blocks: &[PageBlock]) -> Vec<String> {
    blocks.iter().map(|b| b.id.to_string()).collect()
}

#[test]
fn moves_at_the_edges_are_no_ops() {
    let mut blocks = SiteSettings::default_blocks();
    let before = blocks.clone();

    assert!(!move_block(&mut blocks, 0, MoveDirection::Up));
    assert!(!move_block(&mut blocks, before.len() - 1, MoveDirection::Down));
    assert!(!move_block(&mut blocks, before.len() + 3, MoveDirection::Up));
    assert_eq!(blocks, before);
}

#[test]
fn successful_move_keeps_ids_and_renumbers() {
    let mut blocks = SiteSettings::default_blocks();
    let mut expected_ids = ids(&blocks);
    expected_ids.sort();

    for (index, direction) in [
        (2, MoveDirection::Up),
        (0, MoveDirection::Down),
        (4, MoveDirection::Down),
        (3, MoveDirection::Up),
    ] {
        assert!(move_block(&mut blocks, index, direction));

        let mut actual = ids(&blocks);
        actual.sort();
        assert_eq!(actual, expected_ids);

        let orders: Vec<i32> = blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, (0..).take(blocks.len()).collect::<Vec<i32>>());
    }
}

#[test]
fn move_example() {
    let mut blocks = vec![
        PageBlock::new(
            "hero",
            BlockContent::Hero {
                title: "T".to_string(),
                subtitle: "S".to_string(),
            },
            0,
        ),
        PageBlock::new(
            "deals",
            BlockContent::Deals {
                title: "D".to_string(),
            },
            1,
        ),
    ];

    assert!(move_block(&mut blocks, 1, MoveDirection::Up));
    assert_eq!(ids(&blocks), vec!["deals", "hero"]);
    assert_eq!(blocks[0].order, 0);
    assert_eq!(blocks[1].order, 1);
}

#[test]
fn double_toggle_restores_visibility_and_keeps_order() {
    let mut blocks = SiteSettings::default_blocks();
    blocks[3].order = 42;
    let before = blocks.clone();
    let id = BlockId::new("b3");

    assert_eq!(toggle_visibility(&mut blocks, &id), Some(false));
    assert_eq!(blocks[3].order, 42);
    assert_eq!(toggle_visibility(&mut blocks, &id), Some(true));
    assert_eq!(blocks, before);

    assert_eq!(toggle_visibility(&mut blocks, &BlockId::new("nope")), None);
    assert_eq!(blocks, before);
}

#[test]
fn hidden_block_disappears_from_visible_blocks() {
    let store = SettingsStore::default();
    store.toggle_visibility(&BlockId::new("b4"));

    let settings = store.snapshot();
    assert!(settings.visible_blocks().iter().all(|b| b.id.as_str() != "b4"));
    assert_eq!(settings.home_blocks.len(), 6);
}

#[test]
fn theme_update_is_all_or_nothing() {
    let store = SettingsStore::default();

    assert_eq!(
        store.update_theme("Makers Row", "#12345"),
        Err(SettingsError::InvalidColor(curated_core::ColorError::InvalidLength))
    );
    let settings = store.snapshot();
    assert_eq!(settings.site_name, SiteSettings::DEFAULT_NAME);

    store.update_theme("  Makers Row ", "#1a2b3c").unwrap();
    let settings = store.snapshot();
    assert_eq!(settings.site_name, "Makers Row");
    assert_eq!(settings.accent_color.as_str(), "#1a2b3c");

    assert_eq!(store.update_theme("   ", "#fff"), Err(SettingsError::EmptySiteName));
    assert_eq!(store.snapshot().accent_color.as_str(), "#1a2b3c");
}
