//! Benchmarks for model response parsing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marketflow::core::{CampaignContent, MarketResearch};
use marketflow::stages::{parse_stage_output, strip_code_fences};
use marketflow::testing::fixtures;

fn response_benchmark(c: &mut Criterion) {
    let fenced = format!("```json\n{}\n```", fixtures::CAMPAIGN_CONTENT_JSON);

    c.bench_function("strip_code_fences", |b| {
        b.iter(|| strip_code_fences(black_box(&fenced)));
    });

    c.bench_function("parse_market_research", |b| {
        b.iter(|| parse_stage_output::<MarketResearch>(black_box(fixtures::MARKET_RESEARCH_JSON)));
    });

    c.bench_function("parse_fenced_campaign_content", |b| {
        b.iter(|| parse_stage_output::<CampaignContent>(black_box(&fenced)));
    });
}

criterion_group!(benches, response_benchmark);
criterion_main!(benches);
