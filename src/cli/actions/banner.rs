use crate::banner;
use anyhow::Result;

/// Print the basic example project welcome.
/// # Errors
/// Never; the signature matches the other actions.
pub fn welcome() -> Result<()> {
    for line in banner::welcome() {
        println!("{line}");
    }

    Ok(())
}

/// Print the web app landing page.
/// # Errors
/// Never; the signature matches the other actions.
pub fn about() -> Result<()> {
    print!("{}", banner::landing_text());

    Ok(())
}
