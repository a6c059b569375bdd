use safepass_core::generator::{generate_password, password_strength, PasswordOptions};

use crate::error::CliError;

pub fn run_generate(
    length: usize,
    no_uppercase: bool,
    no_numbers: bool,
    no_symbols: bool,
    check: Option<&str>,
) -> Result<(), CliError> {
    if let Some(password) = check {
        println!("{}", password_strength(password));
        return Ok(());
    }

    let options = PasswordOptions {
        length,
        include_uppercase: !no_uppercase,
        include_lowercase: true,
        include_numbers: !no_numbers,
        include_symbols: !no_symbols,
    };
    let password = generate_password(&options);

    println!("{password}");
    eprintln!("strength: {}", password_strength(&password));
    Ok(())
}
