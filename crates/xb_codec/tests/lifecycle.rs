use std::cell::Cell;

use pretty_assertions::assert_eq;
use xb_codec::Formatter;
use xb_reflect::{describe, ExtraData, Lifecycle};

#[derive(Default, Debug)]
struct Audited {
    name: String,
    // Not described: travels through the side channel instead.
    generation: u32,
    // Transient bookkeeping, never stored.
    save_count: Cell<u32>,
    load_finished: bool,
}

describe! { hooks Audited = "Audited" { name } }

impl Lifecycle for Audited {
    fn before_save(&self, extra: &mut ExtraData) {
        extra.set("generation", self.generation.to_string());
    }

    fn after_save(&self, extra: &mut ExtraData) {
        // Too late to be persisted; the sidecar is already written.
        extra.set("note", "saved");
        self.save_count.set(self.save_count.get() + 1);
    }

    fn before_load(&mut self, _extra: &mut ExtraData) {
        self.load_finished = false;
    }

    fn after_load(&mut self, extra: &mut ExtraData) {
        if let Some(generation) = extra.get("generation") {
            self.generation = generation.parse().unwrap_or(0);
        }
        self.load_finished = true;
    }
}

fn formatter() -> Formatter<Audited> {
    Formatter::new()
}

fn sample() -> Audited {
    Audited {
        name: "cfg".into(),
        generation: 7,
        ..Audited::default()
    }
}

#[test]
fn side_channel_entries_travel_with_the_document() {
    let text = formatter().save_to_string(&sample()).unwrap();
    assert!(text.contains("xb:Extra"));
    assert!(text.contains("xb:Entry"));
    assert!(text.contains("key=\"generation\""));

    let loaded = formatter().load_from_str(&text).unwrap();
    assert_eq!(loaded.generation, 7);
    assert!(loaded.load_finished);
}

#[test]
fn save_hooks_fire_once_per_save() {
    let data = sample();
    let f = formatter();
    f.save_to_string(&data).unwrap();
    f.save_to_string(&data).unwrap();
    assert_eq!(data.save_count.get(), 2);
}

#[test]
fn only_before_save_entries_are_persisted() {
    let text = formatter().save_to_string(&sample()).unwrap();
    assert!(text.contains("key=\"generation\""));
    assert!(!text.contains("key=\"note\""));
}

#[test]
fn documents_without_a_sidecar_still_load() {
    let loaded = formatter()
        .load_from_str("<Audited><name>bare</name></Audited>")
        .unwrap();
    assert_eq!(loaded.name, "bare");
    assert_eq!(loaded.generation, 0);
    assert!(loaded.load_finished);
}

#[test]
fn nested_objects_get_their_own_side_channel() {
    #[derive(Default, Debug)]
    struct Outer {
        inner: Audited,
    }

    describe! { Outer = "Outer" { inner } }

    let outer = Outer {
        inner: Audited {
            generation: 3,
            ..sample()
        },
    };
    let f = Formatter::<Outer>::new();
    let loaded = f.load_from_str(&f.save_to_string(&outer).unwrap()).unwrap();
    assert_eq!(loaded.inner.generation, 3);
    assert!(loaded.inner.load_finished);
}
