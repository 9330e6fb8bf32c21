// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
                 _ _           _     
  _____   ____ _| | |__  _   _| |__  
 / _ \ \ / / _` | | '_ \| | | | '_ \ 
|  __/\ V / (_| | | | | | |_| | |_) |
 \___| \_/ \__,_|_|_| |_|\__,_|_.__/ 

    Evaluation Run Metadata API
"#;
    println!("{}", banner);
}
