/// Built-in seed dataset loaded into every new dashboard.
use super::{Platform, Record};

/// Fixed initial placements: `(location, platform, imp_1m, clicks_1m, ctr,
/// imp_4w, clicks_4w, cpc, cpm)`.
const SEED: [(&str, Platform, u64, u64, f64, u64, u64, u64, u64); 10] = [
    ("TOP", Platform::Pc, 632_601, 1_263, 0.20, 376_869, 752, 5_316, 10_614),
    ("A1", Platform::Pc, 775_557, 1_491, 0.19, 129_260, 249, 20_121, 38_682),
    ("A2", Platform::Pc, 775_568, 1_512, 0.19, 116_752, 228, 17_574, 34_261),
    ("B", Platform::Pc, 2_249_036, 948, 0.04, 257_033, 108, 27_690, 11_672),
    ("메인 중간", Platform::Mobile, 83_209, 8, 0.01, 145_616, 14, 178_571, 17_168),
    ("메인 하단", Platform::Mobile, 744_956, 306, 0.04, 672_863, 276, 7_236, 2_972),
    ("커뮤 중간(게시글)", Platform::Mobile, 3_151_666, 5_423, 0.17, 795_015, 1_368, 2_924, 5_031),
    ("커뮤 중간(메인)", Platform::Mobile, 3_151_666, 5_423, 0.17, 795_015, 1_368, 2_924, 5_031),
    ("커뮤 하단(카테)", Platform::Mobile, 2_397_054, 1_183, 0.05, 828_611, 409, 6_113, 3_017),
    ("커뮤 하단(메인)", Platform::Mobile, 1_441_501, 142, 0.01, 498_297, 49, 81_489, 8_027),
];

/// Return a fresh copy of the seed dataset, in fixture order.
pub fn seed_records() -> Vec<Record> {
    SEED.iter()
        .map(
            |&(location, platform, imp_1m, clicks_1m, ctr, imp_4w, clicks_4w, cpc, cpm)| Record {
                location: location.to_string(),
                platform,
                avg_impressions_1m: imp_1m,
                avg_clicks_1m: clicks_1m,
                ctr,
                avg_impressions_4w: imp_4w,
                avg_clicks_4w: clicks_4w,
                cpc,
                cpm,
            },
        )
        .collect()
}
