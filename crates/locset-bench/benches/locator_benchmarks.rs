use criterion::{Criterion, criterion_group, criterion_main};
use locset_core::{Locator, LocatorSet, Token, locator, parse_locator_list};
use locset_test::{fixtures_dir, load_fixture};
use std::fs;
use std::hint::black_box;

/// A wide, shallow set of locators, the shape dirty lists usually have
fn synthetic_locators(count: usize) -> Vec<Locator> {
  let fields = ["points", "normals", "displayColor", "displayOpacity", "st"];
  (0..count)
    .map(|i| {
      let field = fields[i % fields.len()];
      match i % 3 {
        0 => locator!["primvars", field],
        1 => locator!["primvars", field, "primvarValue"],
        _ => locator!["prims", format!("prim{i}"), field],
      }
    })
    .collect()
}

/// Benchmark building sets from each fixture
fn benchmark_fixtures(c: &mut Criterion) {
  let mut group = c.benchmark_group("fixture_flattening");

  for fixture_name in ["minimal.locators", "mesh-dirty.locators", "deep.locators"] {
    let locators = parse_locator_list(&load_fixture(fixture_name)).unwrap();

    group.bench_function(format!("insert_{}", fixture_name.replace(['.', '-'], "_")), |b| {
      b.iter(|| {
        let mut set = LocatorSet::new();
        for locator in black_box(&locators) {
          set.insert(locator.clone());
        }
        set
      });
    });

    group.bench_function(format!("collect_{}", fixture_name.replace(['.', '-'], "_")), |b| {
      b.iter(|| black_box(&locators).iter().cloned().collect::<LocatorSet>());
    });
  }

  group.finish();
}

/// Benchmark incremental insert against bulk flatten as sets grow
fn benchmark_insert_vs_size(c: &mut Criterion) {
  let mut group = c.benchmark_group("insert_vs_size");

  for count in [8, 64, 512] {
    let locators = synthetic_locators(count);

    group.bench_function(format!("insert_{count}"), |b| {
      b.iter(|| {
        let mut set = LocatorSet::new();
        for locator in black_box(&locators) {
          set.insert(locator.clone());
        }
        set
      });
    });

    group.bench_function(format!("collect_{count}"), |b| {
      b.iter(|| black_box(&locators).iter().cloned().collect::<LocatorSet>());
    });

    let set: LocatorSet = locators.iter().cloned().collect();
    group.bench_function(format!("insert_set_{count}"), |b| {
      b.iter(|| {
        let mut merged = set.clone();
        merged.insert_set(black_box(&set));
        merged
      });
    });
  }

  group.finish();
}

/// Benchmark the intersection queries
fn benchmark_intersects(c: &mut Criterion) {
  let mut group = c.benchmark_group("intersects");

  let set: LocatorSet = synthetic_locators(512).into_iter().collect();
  let hit = locator!["primvars", "st", "indices"];
  let miss = locator!["xform", "matrix"];
  let interest: LocatorSet = [locator!["visibility"], locator!["prims", "prim509"]].into();

  group.bench_function("locator_hit", |b| {
    b.iter(|| set.intersects(black_box(&hit)));
  });
  group.bench_function("locator_miss", |b| {
    b.iter(|| set.intersects(black_box(&miss)));
  });
  group.bench_function("set", |b| {
    b.iter(|| set.intersects_set(black_box(&interest)));
  });

  group.finish();
}

/// Benchmark the locator value operations
fn benchmark_locator_ops(c: &mut Criterion) {
  let mut group = c.benchmark_group("locator_ops");

  let short = locator!["primvars", "displayColor"];
  let long = locator!["a", "b", "c", "d", "e", "f", "g", "h"];
  let prefix = locator!["a", "b", "c"];

  group.bench_function("append_inline", |b| {
    b.iter(|| black_box(&short).append(Token::new("primvarValue")));
  });
  group.bench_function("append_spilled", |b| {
    b.iter(|| black_box(&long).append(Token::new("i")));
  });
  group.bench_function("has_prefix", |b| {
    b.iter(|| black_box(&long).has_prefix(black_box(&prefix)));
  });
  group.bench_function("replace_prefix", |b| {
    b.iter(|| black_box(&long).replace_prefix(&prefix, &short));
  });
  group.bench_function("common_prefix", |b| {
    b.iter(|| black_box(&long).common_prefix(black_box(&prefix.append("x"))));
  });

  group.finish();
}

/// Benchmark all fixtures discovered in the fixtures directory
fn benchmark_all_fixtures(c: &mut Criterion) {
  let mut group = c.benchmark_group("all_fixtures");

  let fixtures_dir = fixtures_dir();
  let mut fixtures: Vec<String> = fs::read_dir(&fixtures_dir)
    .unwrap_or_else(|e| {
      panic!(
        "Failed to read fixtures dir {}: {e}",
        fixtures_dir.display()
      )
    })
    .filter_map(|entry| {
      let path = entry.ok()?.path();
      if path.extension()?.to_str()? == "locators" {
        path.file_name()?.to_str().map(ToString::to_string)
      } else {
        None
      }
    })
    .collect();

  fixtures.sort();

  for fixture_name in fixtures {
    let fixture = load_fixture(&fixture_name);
    let label = fixture_name.replace(['.', '-'], "_");
    group.bench_function(label, |b| {
      b.iter(|| {
        let result = locset_core::parse_locator_set(black_box(&fixture));
        assert!(result.is_ok(), "Should parse {fixture_name} successfully");
        result.unwrap()
      });
    });
  }

  group.finish();
}

criterion_group!(
  benches,
  benchmark_fixtures,
  benchmark_insert_vs_size,
  benchmark_intersects,
  benchmark_locator_ops,
  benchmark_all_fixtures,
);
criterion_main!(benches);
