//! Shared payload builders for the integration tests and benchmarks.
//!
//! Payloads are built in memory with [`MapEncoder`] rather than read from
//! committed `.bin` files, so every fixture stays in sync with the wire
//! layout the encoder writes.
//!
//! | Builder          | Contents                                          |
//! |------------------|---------------------------------------------------|
//! | `minimal_level`  | `Map` → `Level x=5`                               |
//! | `sample_map`     | levels, entities, a run-length tile grid, styles  |
//! | `large_map(n)`   | `n` levels with 20 entities each                  |
//! | `nested(depth)`  | a single chain of `depth` nodes                   |
//! | `lookup_fanout`  | one long table string referenced by many children |

#![allow(clippy::pedantic)]

use mapbin_encoder::{MapEncoder, NodeBuilder, WireValue};

/// `Map` → `Level` with one integer attribute, package `P`.
pub fn minimal_level() -> Vec<u8> {
    MapEncoder::new("P")
        .encode(&NodeBuilder::new("Map").child(NodeBuilder::new("Level").attr("x", WireValue::Integer(5))))
        .unwrap()
}

/// A small but representative map using every attribute encoding.
///
/// ```text
/// Map
/// ├── levels
/// │   └── level  name="lvl_a-00" x=0 y=-8 music dark=false
/// │       ├── solids  innerText="00\n01" (run-length)
/// │       └── entities
/// │           ├── player  id=1 x=16 y=160
/// │           └── spring  id=2 angle=0.5 width=8
/// ├── Filler
/// └── Style
///     └── Foregrounds
/// ```
pub fn sample_map() -> Vec<u8> {
    let entities = NodeBuilder::new("entities")
        .child(
            NodeBuilder::new("player")
                .attr("id", WireValue::Byte(1))
                .attr("x", WireValue::Integer(16))
                .attr("y", WireValue::Integer(160)),
        )
        .child(
            NodeBuilder::new("spring")
                .attr("id", WireValue::Byte(2))
                .attr("angle", WireValue::Float(0.5))
                .attr("width", WireValue::Short(8)),
        );

    let level = NodeBuilder::new("level")
        .attr("name", WireValue::String("lvl_a-00".into()))
        .attr("x", WireValue::Integer(0))
        .attr("y", WireValue::Short(-8))
        .attr("music", WireValue::LookupString("music_oldsite_awake".into()))
        .attr("dark", WireValue::Boolean(false))
        .child(NodeBuilder::new("solids").attr("innerText", WireValue::LengthEncodedString("00\n01".into())))
        .child(entities);

    let root = NodeBuilder::new("Map")
        .child(NodeBuilder::new("levels").child(level))
        .child(NodeBuilder::new("Filler"))
        .child(NodeBuilder::new("Style").child(NodeBuilder::new("Foregrounds")));

    MapEncoder::new("1-ForsakenCity").encode(&root).unwrap()
}

/// `levels` levels, each with a 40x23 tile grid and 20 entities.
pub fn large_map(levels: usize) -> Vec<u8> {
    let row = format!("{}{}\n", "0".repeat(20), "1".repeat(20));
    let grid = row.repeat(23);

    let mut levels_node = NodeBuilder::new("levels");
    for i in 0..levels {
        let mut entities = NodeBuilder::new("entities");
        for e in 0..20 {
            entities = entities.child(
                NodeBuilder::new(if e % 2 == 0 { "spikesUp" } else { "strawberry" })
                    .attr("id", WireValue::Integer(e))
                    .attr("x", WireValue::Integer(e * 8))
                    .attr("y", WireValue::Integer(e * 4))
                    .attr("originX", WireValue::Float(e as f32 * 0.5)),
            );
        }
        levels_node = levels_node.child(
            NodeBuilder::new("level")
                .attr("name", WireValue::String(format!("lvl_{i:03}")))
                .attr("width", WireValue::Short(320))
                .attr("height", WireValue::Short(184))
                .child(NodeBuilder::new("solids").attr("innerText", WireValue::LengthEncodedString(grid.clone())))
                .child(entities),
        );
    }

    MapEncoder::new("Bench")
        .encode(&NodeBuilder::new("Map").child(levels_node))
        .unwrap()
}

/// A chain `Map` → `n` → `n` → … with `depth` nodes in total.
pub fn nested(depth: usize) -> Vec<u8> {
    let mut node = NodeBuilder::new("n");
    for _ in 2..depth {
        node = NodeBuilder::new("n").child(node);
    }
    let root = if depth <= 1 {
        NodeBuilder::new("Map")
    } else {
        NodeBuilder::new("Map").child(node)
    };
    MapEncoder::new("Deep").encode(&root).unwrap()
}

/// `children` nodes named `e`, each with a lookup-string `text` attribute
/// pointing at the same `entry_len`-byte table entry.
///
/// The entry is stored once, so the payload grows by a few bytes per
/// child while the decoded tree grows by `entry_len`.
pub fn lookup_fanout(entry_len: usize, children: usize) -> Vec<u8> {
    let text = "x".repeat(entry_len);
    let mut root = NodeBuilder::new("Map");
    for _ in 0..children {
        root = root.child(NodeBuilder::new("e").attr("text", WireValue::LookupString(text.clone())));
    }
    MapEncoder::new("P").encode(&root).unwrap()
}
