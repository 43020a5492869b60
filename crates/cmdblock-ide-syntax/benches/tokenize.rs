use cmdblock_ide_syntax::{CursorPos, Palette, Tokenizer};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn large_command(entries: usize) -> String {
    let mut out = String::from("data merge block ~ ~ ~ {\n  Items:[\n");
    for i in 0..entries {
        out.push_str(&format!(
            "    {{Slot:{}b,id:\"minecraft:stone\",Count:1b,tag:{{display:{{Name:'[{{\"text\":\"item {i}\"}}]'}}}}}},\n",
            i % 27
        ));
    }
    out.push_str("  ]\n}");
    out
}

fn bench_parse_nbt_heavy_command(c: &mut Criterion) {
    let text = large_command(2_000);
    c.bench_function("parse/2k_item_entries", |b| {
        b.iter(|| {
            let tokenizer = Tokenizer::parse(black_box(&text));
            black_box(tokenizer.symbol_count());
        })
    });
}

fn bench_styled_lines_viewport(c: &mut Criterion) {
    let tokenizer = Tokenizer::parse(&large_command(2_000));
    let palette = Palette::default();
    let cursor = CursorPos::new(1_000, 10);

    c.bench_function("styled_line/40_lines", |b| {
        b.iter(|| {
            for line in 980..1_020 {
                black_box(tokenizer.styled_line(line, Some(cursor), 0..120, &palette));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_parse_nbt_heavy_command,
    bench_styled_lines_viewport
);
criterion_main!(benches);
