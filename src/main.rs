use myshell::flags::Flags;
use myshell::shell::Shell;
use std::env;

fn main() -> Result<(), myshell::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("myshell {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    myshell::diag::init(&flags);

    let mut shell = Shell::new(&flags)?;
    let code = shell.run()?;
    std::process::exit(code)
}
