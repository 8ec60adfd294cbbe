use criterion::{black_box, criterion_group, criterion_main, Criterion};
use courier::{message::Attachment, Address, Message};

fn plain_message() -> Message {
    Message::builder()
        .from(Address::named("NoBody", "nobody@domain.tld"))
        .to(Address::named("Hei", "hei@domain.tld"))
        .subject("Happy new year")
        .body("Be happy!")
        .build()
        .unwrap()
}

fn mixed_message() -> Message {
    Message::builder()
        .from(Address::named("NoBody", "nobody@domain.tld"))
        .to(Address::named("Hei", "hei@domain.tld"))
        .cc("cc@domain.tld".into())
        .subject("Happy new year")
        .html_body("<h1>Be happy!</h1><p>See the attached picture.</p>")
        .attachment(Attachment::new(
            "picture.png",
            "image/png",
            vec![0x89; 64 * 1024],
        ))
        .build()
        .unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let plain = plain_message();
    c.bench_function("format plain message", |b| {
        b.iter(|| black_box(&plain).formatted())
    });

    let mixed = mixed_message();
    c.bench_function("format mixed message with 64KiB attachment", |b| {
        b.iter(|| black_box(&mixed).formatted())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
