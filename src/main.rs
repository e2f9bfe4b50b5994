fn main() -> Result<(), floorplanner::AppError> {
    floorplanner::run()
}
