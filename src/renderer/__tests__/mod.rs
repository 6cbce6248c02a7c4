





#[cfg(test)]
mod cast;



#[cfg(test)]
mod ddl;
