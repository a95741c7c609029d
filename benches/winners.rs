// benches/winners.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lottang_scrape::specs::winners;

/// A listing page shaped like the live one: two tier tables behind headings,
/// plus enough surrounding chrome to make selector matching do real work.
fn table_page(rows_per_tier: usize) -> String {
    let mut doc = String::from("<html><head><title>당첨판매점</title></head><body>");
    doc.push_str(&"<div class=\"nav\"><ul><li>메뉴</li><li>공지</li></ul></div>".repeat(20));
    for tier in ["1등 배출점", "2등 배출점"] {
        doc.push_str(&format!("<h4 class=\"title\">{tier}</h4><div class=\"wrap\"><table class=\"tbl_data\">"));
        doc.push_str("<tr><th>번호</th><th>상호명</th><th>구분</th><th>소재지</th></tr>");
        for i in 0..rows_per_tier {
            doc.push_str(&format!(
                "<tr><td>{}</td><td>복권판매점 {i}</td><td>자동</td><td>서울 강남구 테헤란로 {i}길</td></tr>",
                i + 1
            ));
        }
        doc.push_str("</table></div>");
    }
    doc.push_str("</body></html>");
    doc
}

fn card_page(cards: usize) -> String {
    let mut doc = String::from("<html><body><ul class=\"list_map\">");
    for i in 0..cards {
        let tier = if i % 10 == 0 { "1등" } else { "2등" };
        doc.push_str(&format!(
            "<li><p>{tier}</p><strong>행운복권 {i}</strong><br>반자동<br>부산 해운대구 우동 {i}</li>"
        ));
    }
    doc.push_str("</ul></body></html>");
    doc
}

fn bench_winners(c: &mut Criterion) {
    let tables = table_page(60);
    let cards = card_page(120);

    c.bench_function("winners_tables", |b| {
        b.iter(|| {
            let parsed = winners::parse_doc(black_box(&tables));
            black_box(parsed.listings.len())
        })
    });

    c.bench_function("winners_cards", |b| {
        b.iter(|| {
            let parsed = winners::parse_doc(black_box(&cards));
            black_box(parsed.listings.len())
        })
    });
}

criterion_group!(benches, bench_winners);
criterion_main!(benches);
