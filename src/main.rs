use std::process;

fn main() {
    if let Err(e) = easel::run() {
        eprintln!("Error: {e:?}");
        process::exit(1);
    }
}
