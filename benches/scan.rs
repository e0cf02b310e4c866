//! This bench test scans and renders a large document holding many content
//! element variants.

#![allow(missing_docs)]

use std::fmt::Write;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use variant::{Document, Uid};

/// Generates a document with `count` regions separated by ordinary markup.
fn generate(count: i32) -> Vec<u8> {
    let mut html = String::from("<html><body>\n");
    for uid in 1..=count {
        write!(
            html,
            "<section>\n<!--  CONTENT ELEMENT, uid:{uid}/variant-{uid} [begin] -->\n\
             <p>Variant {uid} content goes here.</p>\n\
             <!--  CONTENT ELEMENT, uid:{uid}/variant-{uid} [end] -->\n</section>\n"
        )
        .unwrap();
    }
    html.push_str("</body></html>\n");
    html.into_bytes()
}

fn scan(c: &mut Criterion) {
    let input = generate(10_000);
    c.bench_function("scan 10k regions", |b| {
        b.iter(|| Document::parse(&input).unwrap());
    });
}

fn seed_and_render(c: &mut Criterion) {
    let input = generate(10_000);
    c.bench_function("seed and render 10k regions", |b| {
        b.iter_batched(
            || Document::parse(&input).unwrap(),
            |mut document| {
                document.seed(Uid::new(5_000));
                document.render_to_vec()
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, scan, seed_and_render);
criterion_main!(benches);
