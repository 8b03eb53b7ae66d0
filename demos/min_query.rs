use range_query_tree::{Min, RangeQueryError, RangeQueryTree};

fn main() -> Result<(), RangeQueryError> {
    env_logger::init();

    let nums = [10, 5, 8, 3, 7];
    let mut tree = RangeQueryTree::build(&nums, Min);

    // minimum of indices 0 and 1
    println!("min [0, 2) = {}", tree.query(0, 2)?);
    println!("min [1, 4) = {}", tree.query(1, 4)?);

    tree.update(2, 1)?;
    println!("after values[2] = 1: min [0, 3) = {}", tree.query(0, 3)?);

    if let Err(err) = tree.query(3, 3) {
        println!("query [3, 3) rejected: {}", err);
    }

    print!("{}", tree);
    Ok(())
}
