// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0


use criterion::{criterion_group, criterion_main};
use merge_cycle::bench_merge_cycle;

criterion_group!(sensor_array_benches, bench_merge_cycle);
criterion_main!(sensor_array_benches);
