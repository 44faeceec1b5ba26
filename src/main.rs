use std::io::{self, BufWriter, Write};

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    quash::shell::run(stdin.lock(), &mut out)?;
    out.flush()
}
