use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pydocfmt::tokenize::tokenize;
use pydocfmt::{format_docstring, format_str, FormatOptions};

fn documented_module(functions: usize) -> String {
    let mut source = String::from("'''module docs'''\n\nimport os\n");
    for i in 0..functions {
        source.push_str(&format!(
            concat!(
                "\n\ndef handler_{i}(path, mode=os.O_RDONLY):\n",
                "\n",
                "    '''open the file for handler {i}\n",
                "\n",
                "    This handler opens the given path with the requested mode and reads everything it can, see https://docs.python.org/3/library/os.html for details on the flags.\n",
                "\n",
                "    :param path: the path to open, which must exist and be readable by the current user at the time of the call.\n",
                "    :param mode: flags passed through to open.\n",
                "    '''\n",
                "\n",
                "    return os.open(path, mode)\n",
            ),
            i = i
        ));
    }
    source
}

fn benchmark_format_one_liner(c: &mut Criterion) {
    let options = FormatOptions::new();

    c.bench_function("format_one_liner", |b| {
        b.iter(|| format_docstring("    ", black_box("'''  return the answer  '''"), &options))
    });
}

fn benchmark_format_description(c: &mut Criterion) {
    let options = FormatOptions::new();
    let docstring = concat!(
        "'''Summary line.\n",
        "\n",
        "    A paragraph of prose that runs long enough to need wrapping at the default width, and then some more words for good measure.\n",
        "\n",
        "    :param x: a field with a body long enough that it has to be wrapped onto a second line as well.\n",
        "    '''",
    );

    c.bench_function("format_description", |b| {
        b.iter(|| format_docstring("    ", black_box(docstring), &options))
    });
}

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [10, 50, 100].iter() {
        let source = documented_module(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| tokenize(black_box(source)))
        });
    }
    group.finish();
}

fn benchmark_format_module(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_module");

    for size in [10, 50, 100].iter() {
        let source = documented_module(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| format_str(black_box(source)))
        });
    }
    group.finish();
}

fn benchmark_already_formatted(c: &mut Criterion) {
    let source = format_str(&documented_module(50));

    c.bench_function("format_already_formatted", |b| {
        b.iter(|| format_str(black_box(&source)))
    });
}

criterion_group!(
    benches,
    benchmark_format_one_liner,
    benchmark_format_description,
    benchmark_tokenize,
    benchmark_format_module,
    benchmark_already_formatted
);
criterion_main!(benches);
