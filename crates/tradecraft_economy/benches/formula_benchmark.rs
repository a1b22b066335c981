//! Benchmark for the formula library and planners.
//!
//! Run with: cargo bench --package tradecraft_economy --bench formula_benchmark

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tradecraft_economy::{
    calculate_focus_cost, calculate_item_power, calculate_profit, calculate_sell_cost,
    effective_material_cost, plan_crafting, plan_refining, City, CraftingRequest, FocusModel,
    MarketRates, RecipeMaterial, RefiningPrices, RefiningRequest,
};

fn benchmark_core_formulas(c: &mut Criterion) {
    c.bench_function("sell_cost", |b| {
        b.iter(|| calculate_sell_cost(black_box(1250), black_box(40), black_box(true)));
    });

    c.bench_function("profit", |b| {
        b.iter(|| calculate_profit(black_box(1250), black_box(980), black_box(40), black_box(false)));
    });

    c.bench_function("effective_material_cost", |b| {
        b.iter(|| effective_material_cost(black_box(48_000), black_box(24.8)));
    });

    c.bench_function("focus_cost", |b| {
        let mut efficiency = 0u32;
        b.iter(|| {
            efficiency = (efficiency + 137) % 40_000;
            calculate_focus_cost(black_box(503), efficiency)
        });
    });

    c.bench_function("item_power", |b| {
        b.iter(|| calculate_item_power(black_box(700), black_box(7), black_box(3), black_box(4), black_box(25.0)));
    });
}

fn benchmark_planners(c: &mut Criterion) {
    let craft = CraftingRequest {
        item_id: "T6_2H_CLAYMORE@1".to_string(),
        materials: vec![
            RecipeMaterial::new("T6_METALBAR_LEVEL1@1", 20),
            RecipeMaterial::new("T6_LEATHER_LEVEL1@1", 12),
        ],
        base_focus_cost: 1_200,
        amount: 25,
        craft_city: City::Thetford,
        use_focus: true,
        focus_efficiency: 18_000,
        is_premium: true,
        usage_fee: 2_500.0,
        material_prices: HashMap::from([
            ("T6_METALBAR_LEVEL1@1".to_string(), 1_900),
            ("T6_LEATHER_LEVEL1@1".to_string(), 2_100),
        ]),
        output_price: 95_000,
        black_market_price: Some(101_000),
    };

    c.bench_function("plan_crafting", |b| {
        b.iter(|| plan_crafting(black_box(&craft), &MarketRates::STANDARD, &FocusModel::STANDARD));
    });

    let refine = RefiningRequest {
        resource_item_id: "T7_ORE".to_string(),
        tier: 7,
        enchantment: 1,
        amount: 500,
        usage_fee: 600.0,
        return_rate_percent: 15.2,
        refine_city: Some(City::Thetford),
        is_premium: true,
        use_focus: true,
        focus_efficiency: 25_000,
        prices: Some(RefiningPrices {
            raw_item: 700,
            refined_item: 1_400,
            output_item: 5_200,
        }),
    };

    c.bench_function("plan_refining", |b| {
        b.iter(|| plan_refining(black_box(&refine), &MarketRates::STANDARD, &FocusModel::STANDARD));
    });
}

criterion_group!(benches, benchmark_core_formulas, benchmark_planners);
criterion_main!(benches);
