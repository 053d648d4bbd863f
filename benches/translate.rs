use coding_effects::{
    effects::{Predictor, RefTranscriptData},
    sequences::{translate, TranslationTable},
};
use criterion::{criterion_group, criterion_main, Criterion};

lazy_static::lazy_static! {
    /// Synthetic 30kbp CDS without internal stop codons, followed by a short 3' UTR.
    static ref SEQ_LONG: String = {
        let codons = ["GAT", "CCC", "AAA", "GGC", "TTT", "CTG", "GCA", "ACG"];
        let mut seq = String::from("ATG");
        for i in 0..10_000 {
            seq.push_str(codons[i % codons.len()]);
        }
        seq.push_str("TAAGGGTTTTGAAC");
        seq
    };
}

fn criterion_benchmark(c: &mut Criterion) {
    let cds = &SEQ_LONG[..SEQ_LONG.len() - 11];
    c.bench_function("translate 30kbp CDS", |b| {
        b.iter(|| translate(cds, true, TranslationTable::Standard).unwrap())
    });

    let tx = RefTranscriptData::from_cds(
        "TX_LONG",
        &SEQ_LONG,
        0,
        cds.len(),
        TranslationTable::Standard,
    )
    .unwrap();
    let predictor = Predictor::default();
    c.bench_function("predict in-frame substitution", |b| {
        b.iter(|| {
            predictor
                .predict_on_transcript("GAT", "GAA", 15_003, &tx, "bench")
                .unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
