use square_calls::handhold::animate_frame;
use square_calls::{HandholdConfig, Sequence};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let formation = args.next().unwrap_or_else(|| "Static Square".to_string());
    let calls = args
        .next()
        .map(|path| std::fs::read_to_string(&path).expect("Failed to read file"))
        .unwrap_or_else(|| "heads face left\nsides face right\nheads face right\n".to_string());

    let sequence = match square_calls::choreograph(&formation, &calls) {
        Ok(sequence) => sequence,
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    };
    print_sequence(&sequence);
}

fn print_sequence(sequence: &Sequence) {
    for (part, start) in sequence.parts().iter().zip(sequence.part_starts()) {
        println!(
            "{:>5.1}  line {:<3} {:<30} {} beats",
            start, part.line, part.callname, part.beats
        );
    }

    let mut dancers = sequence.dancers().to_vec();
    let handholds = animate_frame(&mut dancers, sequence.beats(), &HandholdConfig::default());
    println!();
    for d in &dancers {
        let loc = d.location();
        println!(
            "dancer {} ({}) at ({:.2}, {:.2}) facing {:.0}",
            d.number,
            d.gender,
            loc.x,
            loc.y,
            d.facing().to_degrees()
        );
    }
    for h in handholds {
        println!(
            "dancer {} {} hand holds dancer {} {} hand",
            dancers[h.d1].number, h.h1, dancers[h.d2].number, h.h2
        );
    }
}
